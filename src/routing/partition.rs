//! Key → partition mapping.
//!
//! Must stay byte-compatible with the cluster's own slot hashing, so that a
//! probe key lands on the same partition production traffic would.

/// Total number of partitions in the cluster.
pub const PARTITION_COUNT: u32 = 1024;

/// Partition identifier.
pub type PartitionId = u32;

/// Map a key to its partition: CRC-32 (IEEE) of the key bytes mod 1024.
pub fn route(key: &str) -> PartitionId {
    crc32fast::hash(key.as_bytes()) % PARTITION_COUNT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_checksums() {
        // CRC-32/IEEE("123456789") = 0xCBF43926
        assert_eq!(crc32fast::hash(b"123456789"), 0xCBF4_3926);
        assert_eq!(route("123456789"), 0xCBF4_3926 % 1024);
        assert_eq!(route(""), 0);
    }

    #[test]
    fn test_deterministic_and_in_range() {
        for i in 0..4096 {
            let key = format!("codis:test:{}", i);
            let p = route(&key);
            assert!(p < PARTITION_COUNT);
            assert_eq!(p, route(&key));
        }
    }

    #[test]
    fn test_population_spreads_over_partitions() {
        let mut seen = std::collections::HashSet::new();
        for i in 0..2048 {
            seen.insert(route(&format!("codis:test:{}", i)));
        }
        // 2048 keys over 1024 partitions: most, not necessarily all, are hit.
        assert!(seen.len() > 512);
        assert!(seen.len() <= PARTITION_COUNT as usize);
    }
}
