use serde::{Deserialize, Serialize};
use sha2::digest::Update;
use sha2::{Digest, Sha256};
use std::fmt::{Debug, Display};

/// Stable identity of a route: same tokens through the same venues, same hash.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, PartialOrd, Ord)]
pub struct RouteHash(pub [u8; 32]);

impl Display for RouteHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl Debug for RouteHash {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "RouteHash(0x{})", hex::encode(self.0))
    }
}

impl From<[u8; 32]> for RouteHash {
    fn from(hash: [u8; 32]) -> Self {
        RouteHash(hash)
    }
}

impl Serialize for RouteHash {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for RouteHash {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        let bytes = hex::decode(s.trim_start_matches("0x")).map_err(serde::de::Error::custom)?;
        let hash: [u8; 32] = bytes
            .try_into()
            .map_err(|bytes: Vec<u8>| serde::de::Error::custom(format!("expected 32 bytes, got {}", bytes.len())))?;
        Ok(RouteHash(hash))
    }
}

/// Hash the token symbols then the venue labels of a route with sha256.
/// Every entry is length prefixed so ["AB","C"] and ["A","BC"] differ.
pub fn generate_route_hash<T: AsRef<str>, D: AsRef<str>>(tokens: &[T], dexes: &[D]) -> RouteHash {
    let mut hasher = Sha256::new();

    for part in tokens.iter().map(AsRef::as_ref).chain(dexes.iter().map(AsRef::as_ref)) {
        Update::update(&mut hasher, &(part.len() as u64).to_be_bytes());
        Update::update(&mut hasher, part.as_bytes());
    }

    let hash_slice: [u8; 32] = hasher.finalize().into();
    RouteHash(hash_slice)
}
