use rand::Rng;

const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ\
                            abcdefghijklmnopqrstuvwxyz\
                            0123456789";

const HEX_CHARSET: &[u8] = b"0123456789abcdef";

pub fn create_random_secret(secret_len: usize) -> String {
    create_from_charset(CHARSET, secret_len)
}

/// Lowercase hex string made of `byte_len` random bytes
pub fn create_hex_token(byte_len: usize) -> String {
    create_from_charset(HEX_CHARSET, byte_len * 2)
}

fn create_from_charset(charset: &[u8], len: usize) -> String {
    let mut rng = rand::thread_rng();

    (0..len)
        .map(|_| {
            let idx = rng.gen_range(0..charset.len());
            charset[idx] as char
        })
        .collect()
}
