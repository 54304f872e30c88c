use colfilter::bitset::Bitset;

#[cfg(test)]
mod bitset_tests {
    use super::*;

    #[test]
    fn test_new_is_clear() {
        let bits = Bitset::new(20);
        assert_eq!(bits.len(), 20);
        assert_eq!(bits.count(), 0);
        assert_eq!(bits.bytes().len(), 3);
        assert!((0..20).all(|i| !bits.is_set(i)));
        assert!(Bitset::default().is_empty());
    }

    #[test]
    fn test_msb_first_layout() {
        let mut bits = Bitset::new(16);
        bits.set(0);
        bits.set(6);
        bits.set(9);
        assert_eq!(bits.bytes(), &[0x82, 0x40]);
        assert_eq!(bits.set_count(), 3);
        bits.clear(0);
        assert_eq!(bits.bytes(), &[0x02, 0x40]);
        assert_eq!(bits.count(), 3, "set/clear leave the cached count alone");
        assert_eq!(bits.set_count(), 2);
    }

    #[test]
    fn test_out_of_range_reads_false() {
        let bits = Bitset::ones(5);
        assert!(bits.is_set(4));
        assert!(!bits.is_set(5));
        assert!(!bits.is_set(1000));
    }

    #[test]
    fn test_ones() {
        let bits = Bitset::ones(10);
        assert_eq!(bits.count(), 10);
        assert_eq!(bits.to_bytes(), vec![0xFF, 0xC0]);
    }

    #[test]
    fn test_from_bytes_counts() {
        let bits = Bitset::from_bytes(&[0x82, 0xFF], 12);
        assert_eq!(bits.len(), 12);
        assert_eq!(bits.count(), 6);
        assert_eq!(bits.indexes().collect::<Vec<_>>(), vec![0, 6, 8, 9, 10, 11]);
        assert_eq!(bits.to_bytes(), vec![0x82, 0xF0]);
    }

    #[test]
    fn test_ensure_size_preserves_bits() {
        let mut bits = Bitset::new(4);
        bits.set(1);
        bits.set(3);
        bits.ensure_size(40);
        assert_eq!(bits.len(), 40);
        assert!(bits.is_set(1) && bits.is_set(3));
        assert!((4..40).all(|i| !bits.is_set(i)));

        bits.ensure_size(2);
        assert_eq!(bits.len(), 2);
        assert_eq!(bits.set_count(), 1);
    }

    #[test]
    fn test_indexes_ascending() {
        let mut bits = Bitset::new(100);
        for i in [99, 3, 64, 7] {
            bits.set(i);
        }
        assert_eq!(bits.indexes().collect::<Vec<_>>(), vec![3, 7, 64, 99]);
    }

    #[test]
    fn test_set_operations() {
        let a = Bitset::from_bytes(&[0b1100_1100], 8);
        let b = Bitset::from_bytes(&[0b1010_1010], 8);

        let mut and = a.clone();
        and.and(&b);
        assert_eq!(and.bytes(), &[0b1000_1000]);
        assert_eq!(and.count(), 2);

        let mut or = a.clone();
        or.or(&b);
        assert_eq!(or.bytes(), &[0b1110_1110]);
        assert_eq!(or.count(), 6);

        let mut diff = a.clone();
        diff.and_not(&b);
        assert_eq!(diff.bytes(), &[0b0100_0100]);
        assert_eq!(diff.count(), 2);
    }

    #[test]
    fn test_count_ignores_trailing_bits() {
        let mut bits = Bitset::new(3);
        bits.bytes_mut()[0] = 0xFF;
        assert_eq!(bits.set_count(), 3);
        assert_eq!(bits.to_bytes(), vec![0xE0]);
    }
}
