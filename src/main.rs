use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};

use sealfile::files::{sealed_path, unsealed_path};
use sealfile::{decrypt_file, encrypt_file, Passphrase};

#[derive(Parser)]
#[command(
    name = "sealfile",
    version,
    about = "Password-based single-file encryption",
    long_about = "sealfile encrypts a single file with a password-derived key. \
                  Encrypting notes.txt produces notes.txt.enc; decrypting \
                  notes.txt.enc restores notes.txt. The password is never \
                  stored - losing it means losing the file."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt a file, producing `<FILE>.enc`
    #[command(alias = "e")]
    Encrypt {
        /// File to encrypt
        file: std::path::PathBuf,
    },

    /// Decrypt a `.enc` file back to its original name
    #[command(alias = "d")]
    Decrypt {
        /// File to decrypt (must end in .enc)
        file: std::path::PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Encrypt { file } => encrypt_command(&file),
        Commands::Decrypt { file } => decrypt_command(&file),
    }
}

fn encrypt_command(file: &Path) -> Result<()> {
    // Fail before prompting if the input cannot possibly be processed
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }

    let passphrase = prompt_passphrase("Password: ")?;
    if passphrase.is_empty() {
        bail!("Password cannot be empty");
    }
    let confirm = prompt_passphrase("Confirm password: ")?;
    if passphrase.as_str() != confirm.as_str() {
        bail!("Passwords do not match");
    }

    let original_len = file.metadata()?.len();
    let written = encrypt_file(file, &passphrase)?;

    let output = sealed_path(file);
    println!("Encrypted: {}", output.display());
    println!("  Original size:  {}", format_size(original_len));
    println!("  Encrypted size: {}", format_size(written));

    Ok(())
}

fn decrypt_command(file: &Path) -> Result<()> {
    if !file.exists() {
        bail!("File not found: {}", file.display());
    }
    let Some(output) = unsealed_path(file) else {
        bail!("File must have a .enc extension: {}", file.display());
    };

    let passphrase = prompt_passphrase("Password: ")?;
    let written = decrypt_file(file, &passphrase)?;

    println!("Decrypted: {}", output.display());
    println!("  Size: {}", format_size(written));

    Ok(())
}

/// Prompt for a password without echoing it
fn prompt_passphrase(prompt: &str) -> Result<Passphrase> {
    rpassword::prompt_password(prompt)
        .map(Passphrase::from)
        .context("Failed to read password")
}

/// Render a byte count as B/KB/MB/GB with two decimals
fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    format!("{:.2} {}", size, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(0), "0.00 B");
        assert_eq!(format_size(1023), "1023.00 B");
        assert_eq!(format_size(1024), "1.00 KB");
        assert_eq!(format_size(1536), "1.50 KB");
        assert_eq!(format_size(1024 * 1024), "1.00 MB");
        assert_eq!(format_size(3 * 1024 * 1024 * 1024), "3.00 GB");
    }
}
