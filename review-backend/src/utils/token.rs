// src/utils/token.rs

use sha2::{Digest, Sha256};

/// セッション保存用にアクセストークンをSHA-256でハッシュ化する。
/// トークン本体はデータベースに置かない。
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    hex::encode(hasher.finalize())
}
