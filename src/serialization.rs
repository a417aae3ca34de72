//! Byte-level persistence for fitted-model parameters.
//!
//! Parameter structs hold only plain data (tree nodes, scalars), so a single
//! blanket implementation over serde + bincode covers every params type in
//! the crate.

use std::error::Error;

/// Parameter representations that round-trip through bytes.
pub trait SerializableParams: Sized {
    /// Error type returned during (de)serialization.
    type Error: Error + Send + Sync + 'static;

    /// Serialize the parameters into a byte buffer.
    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error>;

    /// Deserialize parameters from a byte buffer.
    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error>;
}

impl<T> SerializableParams for T
where
    T: serde::Serialize + for<'de> serde::Deserialize<'de>,
{
    type Error = bincode::Error;

    fn to_bytes(&self) -> Result<Vec<u8>, Self::Error> {
        bincode::serialize(self)
    }

    fn from_bytes(bytes: &[u8]) -> Result<Self, Self::Error> {
        bincode::deserialize(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::RegimeTreeParams;
    use crate::model::TreeNode;
    use crate::profile::Regime;

    #[test]
    fn test_params_bytes_round_trip() {
        let params = RegimeTreeParams {
            root: TreeNode::Leaf {
                regime: Regime::Old,
                confidence: 0.75,
            },
        };
        let bytes = params.to_bytes().unwrap();
        let restored = RegimeTreeParams::from_bytes(&bytes).unwrap();
        assert_eq!(params, restored);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let garbage: &[u8] = &[0xff, 0xff, 0xff, 0xff];
        assert!(RegimeTreeParams::from_bytes(garbage).is_err());
    }
}
