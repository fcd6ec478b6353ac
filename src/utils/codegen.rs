use nanoid::nanoid;

/// Length of generated short codes.
pub const CODE_LENGTH: usize = 6;

/// Alphanumeric alphabet for generated codes. The default nanoid alphabet
/// includes `-` and `_`, which we keep out of generated codes.
const ALPHABET: &[char] = &[
    '0', '1', '2', '3', '4', '5', '6', '7', '8', '9', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I',
    'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R', 'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b',
    'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k', 'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u',
    'v', 'w', 'x', 'y', 'z',
];

/// Generate a random short code.
///
/// Collision handling is the caller's job: on a store conflict, call again.
pub fn generate_code() -> String {
    nanoid!(CODE_LENGTH, ALPHABET)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alphabet_is_alphanumeric() {
        assert_eq!(ALPHABET.len(), 62);
        assert!(ALPHABET.iter().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn generated_code_has_expected_shape() {
        for _ in 0..100 {
            let code = generate_code();
            assert_eq!(code.len(), CODE_LENGTH);
            assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
        }
    }

    #[test]
    fn generated_codes_are_not_trivially_repeating() {
        let a = generate_code();
        let b = generate_code();
        let c = generate_code();
        assert!(a != b || b != c);
    }
}
