//! TradeInfo 加解密: AES-CBC + PKCS5 填充 (32 字节块) + 十六进制编码
//!
//! 注意: 解密时不校验填充内容, 只读取最后一个字节作为填充长度后截断。
//! 被篡改的密文会得到截断或乱码的明文而不是错误, 这会构成 padding oracle 风险。
//! 需要完整性保护的调用方应先用 TradeSha 校验密文, 再解密。

use aes::cipher::{
    block_padding::NoPadding, BlockCipher, BlockDecryptMut, BlockEncryptMut, KeyInit, KeyIvInit,
};
use aes::{Aes128, Aes192, Aes256};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::query::FieldSet;

/// AES 分组长度
pub const BLOCK_SIZE: usize = 16;

/// 智付通要求的填充块长度 (不是 AES 分组长度)
pub const PADDING_BLOCK_SIZE: u8 = 32;

/// PKCS5 填充
///
/// 填充长度 `p = block_size - len % block_size`, 长度恰好是块的整数倍时仍追加一整块。
/// `block_size` 为 0 时原样返回。
pub fn pkcs5_padding(src: &[u8], block_size: u8) -> Vec<u8> {
    if block_size == 0 {
        return src.to_vec();
    }

    let padding = block_size as usize - src.len() % block_size as usize;
    let mut padded = Vec::with_capacity(src.len() + padding);
    padded.extend_from_slice(src);
    padded.resize(src.len() + padding, padding as u8);
    padded
}

/// 去除 PKCS5 填充
///
/// 以最后一个字节为填充长度截断, 不校验填充字节本身。
/// 填充长度超过数据长度时返回空切片。
pub fn pkcs5_unpadding(src: &[u8]) -> &[u8] {
    match src.last() {
        Some(&padding) => &src[..src.len().saturating_sub(padding as usize)],
        None => src,
    }
}

/// 填充后加密, 返回原始密文字节
///
/// # 参数
/// - `key`: 密钥 (16/24/32 字节分别对应 AES-128/192/256)
/// - `plaintext`: 明文数据, 按 32 字节块做 PKCS5 填充
/// - `iv`: 16 字节的 IV
///
/// # 返回
/// 密文字节; 密钥或 IV 长度不合法时返回 [`Error::InvalidKeyLength`] / [`Error::InvalidIvLength`]
pub fn encrypt(key: &[u8], plaintext: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    check_iv(iv)?;
    let padded = pkcs5_padding(plaintext, PADDING_BLOCK_SIZE);

    trace!(
        plaintext_len = plaintext.len(),
        padded_len = padded.len(),
        key_len = key.len(),
        "aes-cbc encrypt"
    );

    match key.len() {
        16 => encrypt_with_cipher::<Aes128>(key, iv, &padded),
        24 => encrypt_with_cipher::<Aes192>(key, iv, &padded),
        32 => encrypt_with_cipher::<Aes256>(key, iv, &padded),
        len => Err(Error::InvalidKeyLength(len)),
    }
}

/// 解码十六进制密文并解密, 返回仍带填充的明文
///
/// # 参数
/// - `ciphertext`: 十六进制编码的密文, 大小写均可
/// - `key`: 密钥 (16/24/32 字节)
/// - `iv`: 16 字节的 IV
///
/// # 返回
/// 带填充的明文字节; 依次检查十六进制、密文长度、IV、密钥,
/// 分别对应 [`Error::Decoding`]、[`Error::CiphertextLength`]、[`Error::InvalidIvLength`]、[`Error::InvalidKeyLength`]
pub fn decrypt(ciphertext: &str, key: &[u8], iv: &[u8]) -> Result<Vec<u8>> {
    let ciphertext = hex::decode(ciphertext)?;

    // CBC 只能处理完整分组
    if ciphertext.len() < BLOCK_SIZE || ciphertext.len() % BLOCK_SIZE != 0 {
        return Err(Error::CiphertextLength(ciphertext.len()));
    }
    check_iv(iv)?;

    trace!(ciphertext_len = ciphertext.len(), key_len = key.len(), "aes-cbc decrypt");

    match key.len() {
        16 => decrypt_with_cipher::<Aes128>(key, iv, &ciphertext),
        24 => decrypt_with_cipher::<Aes192>(key, iv, &ciphertext),
        32 => decrypt_with_cipher::<Aes256>(key, iv, &ciphertext),
        len => Err(Error::InvalidKeyLength(len)),
    }
}

/// 序列化字段集合并加密为小写十六进制字符串
///
/// # 参数
/// - `fields`: 字段集合, 按键排序后拼成规范查询字符串
/// - `key`: 密钥 (16/24/32 字节)
/// - `iv`: 16 字节的 IV
///
/// # 返回
/// 小写十六进制密文, 长度总是 64 的倍数
pub fn encrypt_payload(fields: &FieldSet, key: &[u8], iv: &[u8]) -> Result<String> {
    let query = fields.to_query_string();
    let ciphertext = encrypt(key, query.as_bytes(), iv)?;

    debug!(
        field_count = fields.len(),
        ciphertext_len = ciphertext.len(),
        "trade info encrypted"
    );

    Ok(hex::encode(ciphertext))
}

/// 解密十六进制密文并去除填充, 返回规范查询字符串
///
/// # 参数
/// - `ciphertext`: 十六进制编码的密文
/// - `key`: 密钥 (16/24/32 字节)
/// - `iv`: 16 字节的 IV
///
/// # 返回
/// 去除填充后的明文; 非 UTF-8 的明文按有损方式转换, 不会报错
pub fn decrypt_payload(ciphertext: &str, key: &[u8], iv: &[u8]) -> Result<String> {
    let plaintext = decrypt(ciphertext, key, iv)?;
    let unpadded = pkcs5_unpadding(&plaintext);

    debug!(plaintext_len = unpadded.len(), "trade info decrypted");

    Ok(String::from_utf8_lossy(unpadded).into_owned())
}

fn check_iv(iv: &[u8]) -> Result<()> {
    if iv.len() != BLOCK_SIZE {
        return Err(Error::InvalidIvLength(iv.len()));
    }
    Ok(())
}

/// 使用指定的 AES 密码做 CBC 加密, 输入必须已按分组对齐
fn encrypt_with_cipher<C>(key: &[u8], iv: &[u8], padded: &[u8]) -> Result<Vec<u8>>
where
    C: BlockEncryptMut + BlockCipher + KeyInit,
{
    let encryptor = cbc::Encryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| Error::InvalidKeyLength(key.len()))?;

    Ok(encryptor.encrypt_padded_vec_mut::<NoPadding>(padded))
}

fn decrypt_with_cipher<C>(key: &[u8], iv: &[u8], ciphertext: &[u8]) -> Result<Vec<u8>>
where
    C: BlockDecryptMut + BlockCipher + KeyInit,
{
    let decryptor = cbc::Decryptor::<C>::new_from_slices(key, iv)
        .map_err(|_| Error::InvalidKeyLength(key.len()))?;

    decryptor
        .decrypt_padded_vec_mut::<NoPadding>(ciphertext)
        .map_err(|_| Error::CiphertextLength(ciphertext.len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const KEY: &[u8] = b"12345678901234567890123456789012";
    const IV: &[u8] = b"1234567890123456";

    #[rstest]
    #[case(0, 32)]
    #[case(1, 31)]
    #[case(31, 1)]
    #[case(32, 32)]
    #[case(122, 6)]
    fn test_pkcs5_padding(#[case] len: usize, #[case] expected_padding: usize) {
        let src = vec![b'a'; len];
        let padded = pkcs5_padding(&src, PADDING_BLOCK_SIZE);

        assert_eq!(padded.len(), len + expected_padding);
        assert_eq!(padded.len() % 32, 0);
        assert!(padded[len..].iter().all(|&b| b as usize == expected_padding));
        assert_eq!(pkcs5_unpadding(&padded), src.as_slice());
    }

    #[test]
    fn test_pkcs5_padding_zero_block_size() {
        assert_eq!(pkcs5_padding(b"abc", 0), b"abc".to_vec());
    }

    #[test]
    fn test_pkcs5_unpadding_does_not_validate() {
        // 填充字节与长度不一致时仍然按最后一个字节截断
        assert_eq!(pkcs5_unpadding(b"abcd\x01\x02"), b"abcd");
        assert_eq!(pkcs5_unpadding(b"abc\x07\x01"), b"abc\x07");
        assert_eq!(pkcs5_unpadding(b"ab\x09"), b"");
        assert_eq!(pkcs5_unpadding(b""), b"");
    }

    #[test]
    fn test_encrypt_block_aligned_plaintext() {
        // 32 字节明文会追加一整块 32 字节的填充
        let plaintext = b"Amt=10&ItemDesc=ABCDEFGHIJKLMNOP";
        let ciphertext = encrypt(KEY, plaintext, IV).unwrap();

        assert_eq!(ciphertext.len(), 64);
        assert_eq!(
            hex::encode(&ciphertext),
            "6caceaaeaa3f43e69cad070885a223cb1b71cc7f55f4fa34d81982b683e4e5cb31dcbeb61c053e8dd2af2ac29508e81b5438050833c6b5edc6bf83f24355db62"
        );

        let decrypted = decrypt(&hex::encode(&ciphertext), KEY, IV).unwrap();
        assert_eq!(decrypted[32..], [32u8; 32]);
        assert_eq!(pkcs5_unpadding(&decrypted), plaintext);
    }

    #[test]
    fn test_aes128_key() {
        let key = b"1234567890abcdef";
        let ciphertext = encrypt(key, b"Amt=40", IV).unwrap();
        assert_eq!(
            hex::encode(&ciphertext),
            "c381b321b5daea9485021d2b05dce6d06d481d3d45fab1fe1fb259497688aecd"
        );
    }

    #[test]
    fn test_aes192_round_trip() {
        let key = b"123456789012345678901234";
        let fields = FieldSet::new().with("Amt", 1).with("ItemDesc", "AES 192");
        let ciphertext = encrypt_payload(&fields, key, IV).unwrap();
        assert_eq!(
            decrypt_payload(&ciphertext, key, IV).unwrap(),
            "Amt=1&ItemDesc=AES+192"
        );
    }

    #[rstest]
    #[case(b"")]
    #[case(b"short")]
    #[case(b"1234567890123456789012345678901234")]
    fn test_invalid_key_length(#[case] key: &[u8]) {
        let err = encrypt(key, b"Amt=40", IV).unwrap_err();
        assert!(matches!(err, Error::InvalidKeyLength(len) if len == key.len()));

        let err = decrypt("75a7be06b08248e385111d84b19d02b4", key, IV).unwrap_err();
        assert!(matches!(err, Error::InvalidKeyLength(_)));
    }

    #[test]
    fn test_invalid_iv_length() {
        let err = encrypt(KEY, b"Amt=40", b"1234567").unwrap_err();
        assert!(matches!(err, Error::InvalidIvLength(7)));
    }

    #[rstest]
    #[case("not hex")]
    #[case("abc")]
    #[case("zz00")]
    fn test_decrypt_invalid_hex(#[case] input: &str) {
        let err = decrypt(input, KEY, IV).unwrap_err();
        assert!(matches!(err, Error::Decoding(_)));
    }

    #[rstest]
    #[case("0011223344556677", 8)]
    #[case("", 0)]
    #[case("00112233445566778899aabbccddeeff00", 17)]
    fn test_decrypt_invalid_length(#[case] input: &str, #[case] len: usize) {
        let err = decrypt(input, KEY, IV).unwrap_err();
        assert!(matches!(err, Error::CiphertextLength(l) if l == len));
    }

    #[test]
    fn test_decrypt_single_block() {
        // 单个 16 字节分组, 明文以 4 个 0x04 结尾
        let plaintext = decrypt_payload("75a7be06b08248e385111d84b19d02b4", KEY, IV).unwrap();
        assert_eq!(plaintext, "HelloWorld12");
    }

    #[test]
    fn test_decrypt_oversized_padding_is_not_an_error() {
        // 最后一个字节为 0x40, 超过明文长度, 得到空字符串
        let plaintext = decrypt_payload("303099a8ed5fc68549969d6907415461", KEY, IV).unwrap();
        assert_eq!(plaintext, "");
    }
}
