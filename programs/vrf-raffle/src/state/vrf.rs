use anchor_lang::prelude::*;
use arrayref::array_ref;

/// Number of random words requested per draw. Exactly one word is ever
/// consumed; requesting more would only waste subscription funds.
pub const NUM_WORDS: u32 = 1;

// 32 (authority) + 32 (key_hash) + 8 (subscription_id) +
// 2 (request_confirmations) + 4 (callback_gas_limit)
pub const VRF_CONFIG_SIZE: usize = 32 + 32 + 8 + 2 + 4;

/// Immutable VRF provider parameters, fixed at raffle initialization.
///
/// The provider itself runs off-chain: it watches for `RandomWordsRequested`
/// events and answers by invoking `fulfill_random_words` signed with
/// `authority`. This struct only types that boundary; no provider logic
/// lives in the program.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct VrfConfig {
    /// The provider identity allowed to fulfill randomness requests
    pub authority: Pubkey,
    /// Provider key/tier identifier selecting the fee lane
    pub key_hash: [u8; 32],
    /// Subscription that funds requests on the provider side
    pub subscription_id: u64,
    /// Confirmations the provider waits for before responding
    pub request_confirmations: u16,
    /// Gas budget the provider allots to the fulfillment callback
    pub callback_gas_limit: u32,
}

/// A fully-specified randomness request as handed to the provider.
/// Built by `perform_upkeep` and surfaced through `RandomWordsRequested`.
pub struct VrfRequest {
    pub request_id: u64,
    pub key_hash: [u8; 32],
    pub subscription_id: u64,
    pub request_confirmations: u16,
    pub callback_gas_limit: u32,
    pub num_words: u32,
    /// Requests are always paid in the native token, never in a
    /// secondary credit.
    pub native_payment: bool,
}

impl VrfRequest {
    pub fn new(config: &VrfConfig, request_id: u64) -> Self {
        Self {
            request_id,
            key_hash: config.key_hash,
            subscription_id: config.subscription_id,
            request_confirmations: config.request_confirmations,
            callback_gas_limit: config.callback_gas_limit,
            num_words: NUM_WORDS,
            native_payment: true,
        }
    }
}

/// Reduces a 32-byte random word to the u64 draw value.
/// The low 8 bytes are taken little-endian; the provider's words are
/// uniformly distributed, so any fixed 8-byte window is too.
pub fn draw_value(word: &[u8; 32]) -> u64 {
    u64::from_le_bytes(*array_ref![word, 0, 8])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_value_reads_low_bytes_little_endian() {
        let mut word = [0u8; 32];
        word[0] = 7;
        assert_eq!(draw_value(&word), 7);

        let mut word = [0u8; 32];
        word[..8].copy_from_slice(&0xdead_beef_u64.to_le_bytes());
        // High bytes must not influence the value
        word[8..].fill(0xff);
        assert_eq!(draw_value(&word), 0xdead_beef);
    }

    #[test]
    fn request_carries_config_and_fixed_parameters() {
        let config = VrfConfig {
            authority: Pubkey::new_unique(),
            key_hash: [9u8; 32],
            subscription_id: 42,
            request_confirmations: 3,
            callback_gas_limit: 500_000,
        };
        let request = VrfRequest::new(&config, 11);
        assert_eq!(request.request_id, 11);
        assert_eq!(request.key_hash, [9u8; 32]);
        assert_eq!(request.subscription_id, 42);
        assert_eq!(request.request_confirmations, 3);
        assert_eq!(request.callback_gas_limit, 500_000);
        assert_eq!(request.num_words, 1);
        assert!(request.native_payment);
    }
}
