use colfilter::sorted::*;
use colfilter::wide_int::Int128;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

#[cfg(test)]
mod lookup_tests {
    use super::*;

    #[test]
    fn test_contains_sparse() {
        let arr = [1i64, 4, 9, 16, 25];
        assert!(contains(&arr, &9));
        assert!(!contains(&arr, &10));
        assert!(!contains(&arr, &0));
        assert!(!contains(&arr, &26));
        assert!(!contains::<i64>(&[], &1));
    }

    #[test]
    fn test_contains_dense() {
        let arr: Vec<u32> = (100..200).collect();
        assert!(contains(&arr, &100));
        assert!(contains(&arr, &150));
        assert!(contains(&arr, &199));
        assert!(!contains(&arr, &200));
        assert!(!contains(&arr, &99));
    }

    #[test]
    fn test_contains_wide_and_strings() {
        let arr: Vec<Int128> = (-5i64..5).map(Int128::from).collect();
        assert!(contains(&arr, &Int128::from(-5i64)));
        assert!(!contains(&arr, &Int128::from(5i64)));

        let words = ["apple", "banana", "cherry"];
        assert!(contains(&words, &"banana"));
        assert!(!contains(&words, &"blueberry"));
    }

    #[test]
    fn test_index_with_cursor() {
        let arr = [2i32, 3, 5, 7, 11, 13];
        assert_eq!(index(&arr, &7, 0), Some(3));
        assert_eq!(index(&arr, &7, 3), Some(3));
        assert_eq!(index(&arr, &7, 4), None);
        assert_eq!(index(&arr, &13, 5), Some(5));
        assert_eq!(index(&arr, &2, 6), None);
        assert_eq!(index(&arr, &2, 100), None);
    }

    #[test]
    fn test_index_dense_tail() {
        let arr = [1i16, 50, 51, 52, 53];
        assert_eq!(index(&arr, &52, 1), Some(3));
        assert_eq!(index(&arr, &1, 1), None);
    }

    #[test]
    fn test_contains_agrees_with_index() {
        let mut rng = StdRng::seed_from_u64(9);
        for _ in 0..100 {
            let raw: Vec<i64> = (0..rng.random_range(0..50)).map(|_| rng.random_range(-30..30)).collect();
            let arr = unique(&raw);
            for v in -35..35 {
                assert_eq!(contains(&arr, &v), index(&arr, &v, 0).is_some());
                assert_eq!(contains(&arr, &v), raw.contains(&v));
            }
        }
    }
}

#[cfg(test)]
mod range_tests {
    use super::*;

    #[test]
    fn test_min_max() {
        assert_eq!(min_max::<i32>(&[]), None);
        assert_eq!(min_max(&[7]), Some((7, 7)));
        assert_eq!(min_max(&[3, 1]), Some((1, 3)));
        assert_eq!(min_max(&[4, -2, 9, 0, 9, -2]), Some((-2, 9)));
        assert_eq!(
            min_max(&["pear".to_string(), "fig".to_string(), "plum".to_string()]),
            Some(("fig".to_string(), "plum".to_string()))
        );
    }

    #[test]
    fn test_contains_range() {
        let arr = [10, 20, 30, 40];
        assert!(contains_range(&arr, &5, &10));
        assert!(contains_range(&arr, &40, &50));
        assert!(contains_range(&arr, &15, &25));
        assert!(contains_range(&arr, &0, &100));
        assert!(contains_range(&arr, &20, &20));
        assert!(!contains_range(&arr, &21, &29));
        assert!(!contains_range(&arr, &41, &50));
        assert!(!contains_range(&arr, &0, &9));
        assert!(!contains_range::<i32>(&[], &0, &9));
    }

    #[test]
    fn test_contains_range_empty_interval() {
        let arr = [10, 20, 30];
        assert!(!contains_range(&arr, &25, &15));
        assert!(!contains_range(&arr, &30, &10));
    }

    #[test]
    fn test_contains_range_matches_scan() {
        let mut rng = StdRng::seed_from_u64(12);
        for _ in 0..200 {
            let raw: Vec<i32> = (0..rng.random_range(0..20)).map(|_| rng.random_range(0..100)).collect();
            let arr = unique(&raw);
            let (from, to) = (rng.random_range(-5..105), rng.random_range(-5..105));
            let want = arr.iter().any(|v| (from..=to).contains(v));
            assert_eq!(contains_range(&arr, &from, &to), want, "{arr:?} [{from}, {to}]");
        }
    }
}

#[cfg(test)]
mod set_tests {
    use super::*;

    #[test]
    fn test_unique() {
        let input = [5, 3, 5, 1, 3, 9];
        assert_eq!(unique(&input), vec![1, 3, 5, 9]);
        assert_eq!(input, [5, 3, 5, 1, 3, 9], "input is left untouched");
        assert_eq!(unique::<u8>(&[]), Vec::<u8>::new());
        assert_eq!(unique(&[1, 1, 2, 2]), vec![1, 2]);
    }

    #[test]
    fn test_intersect() {
        let x = [1, 2, 2, 4, 6, 8];
        let y = [2, 2, 3, 4, 8, 10];
        assert_eq!(intersect(&x, &y, Vec::new()), vec![2, 4, 8]);
        assert_eq!(intersect(&x, &[], Vec::new()), Vec::<i32>::new());
    }

    #[test]
    fn test_intersect_reuses_buffer() {
        let buf = vec![99, 98, 97];
        let out = intersect(&[1, 2, 3], &[3, 4], buf);
        assert_eq!(out, vec![3]);
        assert!(out.capacity() >= 3);
    }

    #[test]
    fn test_union() {
        assert_eq!(union(&[1, 3, 5], &[2, 3, 6, 7]), vec![1, 2, 3, 5, 6, 7]);
        assert_eq!(union(&[1, 1, 2], &[]), vec![1, 2]);
        assert_eq!(union::<i32>(&[], &[]), Vec::<i32>::new());
    }

    #[test]
    fn test_set_ops_random() {
        let mut rng = StdRng::seed_from_u64(21);
        for _ in 0..100 {
            let a: Vec<u16> = (0..rng.random_range(0..40)).map(|_| rng.random_range(0..60)).collect();
            let b: Vec<u16> = (0..rng.random_range(0..40)).map(|_| rng.random_range(0..60)).collect();
            let (a, b) = (unique(&a), unique(&b));

            let both = intersect(&a, &b, Vec::new());
            assert!(both.is_sorted());
            assert!(both.windows(2).all(|w| w[0] < w[1]));
            assert!(both.iter().all(|v| a.contains(v) && b.contains(v)));
            assert_eq!(both.len(), a.iter().filter(|v| b.contains(v)).count());

            let either = union(&a, &b);
            assert!(either.windows(2).all(|w| w[0] < w[1]));
            let mut joined = [a.clone(), b.clone()].concat();
            joined.sort();
            joined.dedup();
            assert_eq!(either, joined);
        }
    }
}
