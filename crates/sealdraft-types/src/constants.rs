//! System-wide constants for sealed lineups.

/// Symmetric key length in bytes (256-bit AEAD keys).
pub const KEY_SIZE: usize = 32;

/// AEAD nonce length in bytes.
pub const NONCE_SIZE: usize = 12;

/// AEAD authentication tag length in bytes.
pub const TAG_SIZE: usize = 16;

/// Commitment salt length in bytes.
pub const SALT_SIZE: usize = 16;

/// Commitment digest length in bytes.
pub const COMMITMENT_SIZE: usize = 32;

/// Default number of players in a lineup.
pub const DEFAULT_ROSTER_SIZE: usize = 5;

/// Largest roster a configuration may ask for.
pub const MAX_ROSTER_SIZE: usize = 64;

/// Maximum picks sealed in one `SelectionBatch` call.
pub const MAX_BATCH_SIZE: usize = 1_024;

/// Current version byte of the canonical codec.
pub const CODEC_VERSION: u8 = 1;

/// Domain tag prefixed to every encoded lineup.
pub const LINEUP_DOMAIN: &[u8] = b"sealdraft:lineup:";

/// Domain tag prefixed to every encoded draft pick.
pub const PICK_DOMAIN: &[u8] = b"sealdraft:pick:";

/// Domain tag prefixed to every commitment preimage.
pub const COMMIT_DOMAIN: &[u8] = b"sealdraft:commit:";

/// Domain tag for keys derived from wallet signatures.
pub const KEY_DERIVATION_DOMAIN: &[u8] = b"sealdraft:key:v1:";

/// Version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
