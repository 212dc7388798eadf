use rand::Rng;

const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Source of the random invite tokens handed to new accounts.
pub trait RandomTokenGenerator: Send + Sync {
    fn generate(&self, len: usize) -> String;
}

/// Draws ASCII letters from the thread RNG.
#[derive(Debug, Default, Clone, Copy)]
pub struct AlphaTokens;

impl RandomTokenGenerator for AlphaTokens {
    fn generate(&self, len: usize) -> String {
        let mut rng = rand::thread_rng();
        (0..len)
            .map(|_| LETTERS[rng.gen_range(0..LETTERS.len())] as char)
            .collect()
    }
}
