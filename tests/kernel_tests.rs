// Tests for the lane types and block kernels in `colfilter::kernels`.
use colfilter::kernels::*;
use colfilter::predicate::*;

#[cfg(test)]
mod i64_lane_tests {
    use super::*;

    #[test]
    fn test_i64_splat_chunk() {
        assert_eq!(i64::mask8(&[42i64; 8], &eq(42)), 0xFF);
        assert_eq!(i64::mask8(&[42i64; 8], &neq(42)), 0x00);
    }

    #[test]
    fn test_i64_halves_fill_low_then_high_bits() {
        let chunk = [1i64, 2, 3, 4, 9, 10, 11, 12];
        assert_eq!(i64::mask8(&chunk, &lte(4)), 0x0F);
        assert_eq!(i64::mask8(&chunk, &gt(4)), 0xF0);
        assert_eq!(i64::mask8(&chunk, &eq(10)), 0b0010_0000);
    }

    #[test]
    fn test_i64_ordering() {
        let chunk = [5i64, 4, 3, 2, 1, 0, -1, -2];
        assert_eq!(i64::mask8(&chunk, &gt(1)), 0b0000_1111);
        assert_eq!(i64::mask8(&chunk, &gte(1)), 0b0001_1111);
        assert_eq!(i64::mask8(&chunk, &lt(1)), 0b1110_0000);
        assert_eq!(i64::mask8(&chunk, &lte(1)), 0b1111_0000);
        assert_eq!(i64::mask8(&chunk, &between(3, 0)), 0b0011_1100);
    }

    #[test]
    fn test_i64_extremes() {
        let chunk = [i64::MIN, i64::MAX, 0, -1, 1, i64::MIN, i64::MAX, 0];
        assert_eq!(i64::mask8(&chunk, &lt(0)), 0b0010_1001);
        assert_eq!(i64::mask8(&chunk, &eq(i64::MAX)), 0b0100_0010);
        assert_eq!(i64::mask8(&chunk, &between(i64::MIN, -1)), 0b0010_1001);
        assert_eq!(i64::mask8(&chunk, &between(i64::MIN, i64::MAX)), 0xFF);
        assert_eq!(i64::mask8(&chunk, &neq(0)), 0b0111_1011);
    }
}

#[cfg(test)]
mod lane_compare_tests {
    use super::*;

    #[test]
    fn test_mask8_is_lsb_first() {
        let chunk = [5i64, 2, 3, 4, 7, 8, 5, 9];
        assert_eq!(i64::mask8(&chunk, &eq(5)), 0b0100_0001);
    }

    #[test]
    fn test_unsigned_lanes_order_as_unsigned() {
        let chunk = [0u64, 1, 1 << 63, u64::MAX, 2, 3, 4, 5];
        assert_eq!(u64::mask8(&chunk, &gt(1)), 0b1111_1100);
        assert_eq!(u64::mask8(&chunk, &between(1, 1 << 63)), 0b1111_0110);

        let chunk = [0u32, 1, 1 << 31, u32::MAX, 2, 3, 4, 5];
        assert_eq!(u32::mask8(&chunk, &lt(2)), 0b0000_0011);
        assert_eq!(u32::mask8(&chunk, &gte(1 << 31)), 0b0000_1100);
    }

    #[test]
    fn test_i32_all_kinds() {
        let chunk = [-3i32, 0, 3, 6, 9, 12, -100, 100];
        assert_eq!(i32::mask8(&chunk, &eq(3)), 0b0000_0100);
        assert_eq!(i32::mask8(&chunk, &neq(3)), 0b1111_1011);
        assert_eq!(i32::mask8(&chunk, &lt(3)), 0b0100_0011);
        assert_eq!(i32::mask8(&chunk, &lte(3)), 0b0100_0111);
        assert_eq!(i32::mask8(&chunk, &gt(3)), 0b1011_1000);
        assert_eq!(i32::mask8(&chunk, &gte(3)), 0b1011_1100);
        assert_eq!(i32::mask8(&chunk, &between(0, 9)), 0b0001_1110);
        assert_eq!(i32::mask8(&chunk, &between(9, 0)), 0b0001_1110);
    }
}

#[cfg(test)]
mod block_kernel_tests {
    use super::*;

    #[test]
    fn test_block_writes_msb_first_bytes() {
        let mut block = [0i64; BLOCK_256];
        block[0] = 1;
        block[9] = 1;
        block[31] = 1;
        let mut out = [0u8; BLOCK_256 / 8];
        let count = block_kernel::<i64, BLOCK_256>(&block, &eq(1), &mut out);
        assert_eq!(count, 3);
        assert_eq!(out, [0x80, 0x40, 0x00, 0x01]);
    }

    #[test]
    fn test_wide_block() {
        let block: Vec<u32> = (0..BLOCK_512 as u32).collect();
        let mut out = [0u8; BLOCK_512 / 8];
        let count = block_kernel::<u32, BLOCK_512>(&block, &lt(12), &mut out);
        assert_eq!(count, 12);
        assert_eq!(out, [0xFF, 0xF0, 0, 0, 0, 0, 0, 0]);
    }

    #[test]
    fn test_kernel_set_sizes() {
        let set = kernel_set::<i32>();
        assert_eq!(set.avx512.map(|k| k.block_size), Some(BLOCK_512));
        assert_eq!(set.avx2.map(|k| k.block_size), Some(BLOCK_256));
    }
}
