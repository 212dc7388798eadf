use std::fs;
use std::process::{Command, Stdio};

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use sha2::{Digest, Sha256};
use tracing::debug;

use crate::error::{Error, Result};

/// Key material produced by a [`KeyGenerator`].
#[derive(Debug, Clone)]
pub struct GeneratedKey {
    /// Authorized-keys form: `<type> <base64 blob>`.
    pub public_key: String,
    /// PEM-encoded private key.
    pub private_key: String,
    /// `SHA256:` fingerprint of the public key blob.
    pub fingerprint: String,
}

pub trait KeyGenerator: Send + Sync {
    fn generate(&self, key_type: &str, bits: u32) -> Result<GeneratedKey>;
}

/// Generates keys with the system `ssh-keygen`.
#[derive(Debug, Clone)]
pub struct SshKeygen {
    program: String,
}

impl Default for SshKeygen {
    fn default() -> Self {
        Self {
            program: "ssh-keygen".to_string(),
        }
    }
}

impl SshKeygen {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Uses another `ssh-keygen` compatible binary.
    #[must_use]
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Returns true when the program can be spawned.
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-?")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }
}

impl KeyGenerator for SshKeygen {
    fn generate(&self, key_type: &str, bits: u32) -> Result<GeneratedKey> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("id");

        debug!("Generating {} key ({} bits) with {}", key_type, bits, self.program);

        let output = Command::new(&self.program)
            .args(["-q", "-t", key_type, "-b", &bits.to_string()])
            .args(["-N", "", "-C", "", "-m", "PEM", "-f"])
            .arg(&path)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| Error::KeyGeneration(format!("failed to run {}: {e}", self.program)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(Error::KeyGeneration(format!(
                "{} exited with {}: {}",
                self.program,
                output.status,
                stderr.trim()
            )));
        }

        let private_key = fs::read_to_string(&path)?;
        let public_line = fs::read_to_string(path.with_extension("pub"))?;

        let mut fields = public_line.split_whitespace();
        let (Some(kind), Some(blob)) = (fields.next(), fields.next()) else {
            return Err(Error::KeyGeneration(format!(
                "malformed public key: {}",
                public_line.trim()
            )));
        };

        Ok(GeneratedKey {
            public_key: format!("{kind} {blob}"),
            private_key,
            fingerprint: fingerprint(blob)?,
        })
    }
}

/// Computes the OpenSSH `SHA256:` fingerprint of a base64 public key blob.
pub fn fingerprint(blob: &str) -> Result<String> {
    let raw = STANDARD
        .decode(blob)
        .map_err(|e| Error::KeyGeneration(format!("invalid public key encoding: {e}")))?;
    let digest = Sha256::digest(&raw);
    Ok(format!("SHA256:{}", STANDARD_NO_PAD.encode(digest)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_format() {
        let blob = STANDARD.encode(b"\x00\x00\x00\x0bssh-ed25519");
        let fp = fingerprint(&blob).unwrap();

        assert!(fp.starts_with("SHA256:"));
        // 32 digest bytes in unpadded base64
        assert_eq!(fp.len(), "SHA256:".len() + 43);
        assert!(!fp.ends_with('='));
    }

    #[test]
    fn test_fingerprint_is_stable() {
        let blob = STANDARD.encode(b"key blob");
        assert_eq!(fingerprint(&blob).unwrap(), fingerprint(&blob).unwrap());
        assert_ne!(
            fingerprint(&blob).unwrap(),
            fingerprint(&STANDARD.encode(b"other blob")).unwrap()
        );
    }

    #[test]
    fn test_fingerprint_rejects_bad_base64() {
        let result = fingerprint("not base64!");
        assert!(matches!(result, Err(Error::KeyGeneration(_))));
    }

    #[test]
    fn test_missing_program_is_key_generation_error() {
        let keygen = SshKeygen::with_program("sshportal-no-such-keygen");
        assert!(!keygen.is_available());

        let result = keygen.generate("rsa", 2048);
        assert!(matches!(result, Err(Error::KeyGeneration(_))));
    }

    #[test]
    fn test_generates_rsa_key() {
        let keygen = SshKeygen::new();
        if !keygen.is_available() {
            eprintln!("Skipping test: ssh-keygen not available");
            return;
        }

        let key = keygen.generate("rsa", 2048).unwrap();
        assert!(key.public_key.starts_with("ssh-rsa "));
        assert!(key.private_key.contains("PRIVATE KEY"));
        assert!(key.fingerprint.starts_with("SHA256:"));
    }
}
