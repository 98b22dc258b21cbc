extern crate rbm_algebra;

#[cfg(test)]
mod tests {
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha8Rng;

    use rbm_algebra::errors::{Error, Index, Shape};
    use rbm_algebra::vectors::Vector;

    fn base_vector() -> Vector {
        Vector::from(vec![1.0, 2.0, 3.0, 4.0, 5.0, 6.0])
    }

    #[test]
    fn check_size() {
        assert_eq!(6, base_vector().size());
        assert_eq!(0, Vector::zeros(0).size());
        assert!(Vector::zeros(0).is_empty());
    }

    #[test]
    fn check_get_set() {
        let mut v = Vector::zeros(4);
        v.set(0, 1.0).unwrap();
        v.set(3, 4.0).unwrap();
        assert_eq!(1.0, v.get(0).unwrap());
        assert_eq!(4.0, v.get(3).unwrap());
        assert_eq!(&[1.0, 0.0, 0.0, 4.0], v.as_slice());
    }

    #[test]
    fn check_out_of_range_access() {
        let mut v = Vector::zeros(4);
        let expected = Error::IndexOutOfRange {
            index: Index::Vector(4),
            shape: Shape::Vector(4),
        };
        assert_eq!(Err(expected.clone()), v.get(4));
        assert_eq!(Err(expected), v.set(4, 1.0));
        assert_eq!(Vector::zeros(4), v);
    }

    #[test]
    fn check_equality() {
        let mut random_generator = ChaCha8Rng::seed_from_u64(10);
        let random = Vector::random(10, &mut random_generator);
        assert_eq!(base_vector(), base_vector());
        assert_eq!(random, random.copy());
        assert!(base_vector().equals(&base_vector()).unwrap());
        assert!(!base_vector().equals(&Vector::zeros(6)).unwrap());
        // different lengths are unequal with ==, but an error with equals
        assert_ne!(base_vector(), Vector::zeros(3));
        assert!(matches!(
            base_vector().equals(&Vector::zeros(3)),
            Err(Error::DimensionMismatch { .. })
        ));
    }

    #[test]
    fn check_copy_is_independent() {
        let original = base_vector();
        let mut copy = original.copy();
        assert_eq!(original, copy);
        copy.set(0, 100.0).unwrap();
        assert_eq!(1.0, original.get(0).unwrap());
    }

    #[test]
    fn check_inner() {
        let a = Vector::from(vec![1.0, 2.0, 3.0]);
        let b = Vector::from(vec![1.0, 2.0, 3.0]);
        assert_eq!(14.0, a.inner(&b).unwrap());
        let a = Vector::from(vec![-1.0, -2.0, -3.0]);
        assert_eq!(-14.0, a.inner(&b).unwrap());
    }

    #[test]
    fn check_inner_mismatch_is_an_error() {
        let a = Vector::from(vec![1.0, 2.0, 3.0]);
        let b = Vector::from(vec![1.0, 2.0]);
        assert_eq!(
            Err(Error::DimensionMismatch {
                operation: "inner product",
                left: Shape::Vector(3),
                right: Shape::Vector(2),
            }),
            a.inner(&b)
        );
    }

    #[test]
    fn check_inner_is_commutative() {
        let mut random_generator = ChaCha8Rng::seed_from_u64(11);
        for _ in 0..20 {
            let size = random_generator.random_range(0..12);
            let a = Vector::random(size, &mut random_generator);
            let b = Vector::random(size, &mut random_generator);
            assert_eq!(a.inner(&b).unwrap(), b.inner(&a).unwrap());
        }
    }

    #[test]
    fn check_outer() {
        let a = Vector::from((1..=9).map(|x| x as f64).collect::<Vec<f64>>());
        let outer = a.outer(&a);
        assert_eq!((9, 9), outer.size());
        let expected: Vec<f64> = (1..=9)
            .flat_map(|i| (1..=9).map(move |j| (i * j) as f64))
            .collect();
        assert_eq!(expected, outer.row_major_values());
    }

    #[test]
    fn check_outer_entries() {
        let mut random_generator = ChaCha8Rng::seed_from_u64(12);
        let a = Vector::random(4, &mut random_generator);
        let b = Vector::random(7, &mut random_generator);
        let outer = a.outer(&b);
        assert_eq!((4, 7), outer.size());
        for i in 0..4 {
            for j in 0..7 {
                assert_eq!(a.get(i).unwrap() * b.get(j).unwrap(), outer.get(i, j).unwrap());
            }
        }
    }

    #[test]
    fn check_map_mut() {
        let mut v = base_vector();
        v.map_mut(|x| x * x);
        assert_eq!(&[1.0, 4.0, 9.0, 16.0, 25.0, 36.0], v.as_slice());
    }

    #[test]
    fn check_map_mut_with_index() {
        let mut v = base_vector();
        v.map_mut_with_index(|i, x| x * i as f64);
        assert_eq!(&[0.0, 2.0, 6.0, 12.0, 20.0, 30.0], v.as_slice());
    }

    #[test]
    fn check_zip_map_mut() {
        let mut v = base_vector();
        let other = v.copy();
        v.zip_map_mut(&other, |a, b| a - b).unwrap();
        assert_eq!(Vector::zeros(6), v);
        assert!(v.zip_map_mut(&Vector::zeros(5), |a, b| a + b).is_err());
    }

    #[test]
    fn check_elementwise_operations() {
        let base = base_vector();
        let mut sum = base.copy();
        sum.sum_mut(&base).unwrap();
        assert_eq!(&[2.0, 4.0, 6.0, 8.0, 10.0, 12.0], sum.as_slice());
        let mut difference = base.copy();
        difference.sub_mut(&base).unwrap();
        assert_eq!(Vector::zeros(6), difference);
        let mut product = base.copy();
        product.mul_mut(&base).unwrap();
        assert_eq!(&[1.0, 4.0, 9.0, 16.0, 25.0, 36.0], product.as_slice());
        let mut quotient = base.copy();
        quotient.div_mut(&base).unwrap();
        assert_eq!(&[1.0; 6], quotient.as_slice());
    }

    #[test]
    fn check_elementwise_mismatch_leaves_vector_unchanged() {
        let mut v = base_vector();
        let short = Vector::zeros(2);
        assert!(v.sum_mut(&short).is_err());
        assert!(v.sub_mut(&short).is_err());
        assert!(v.mul_mut(&short).is_err());
        assert!(v.div_mut(&short).is_err());
        assert_eq!(base_vector(), v);
    }

    #[test]
    fn check_chaining_mutates_in_place() {
        let mut v = base_vector();
        let ones = Vector::from(vec![1.0; 6]);
        v.sum_mut(&ones).unwrap().mul_mut(&ones).unwrap().map_mut(|x| x - 1.0);
        assert_eq!(base_vector(), v);
    }

    #[test]
    fn check_sum_then_sub_round_trips() {
        let mut random_generator = ChaCha8Rng::seed_from_u64(13);
        for _ in 0..20 {
            let size = random_generator.random_range(0..12);
            // integer valued so addition and subtraction are exact
            let a = Vector::random(size, &mut random_generator).into_vec();
            let a = Vector::from(a.iter().map(|x| (x * 100.0).floor()).collect::<Vec<f64>>());
            let b = Vector::from(
                (0..size)
                    .map(|_| random_generator.random_range(-50..50) as f64)
                    .collect::<Vec<f64>>(),
            );
            let mut c = a.copy();
            c.sum_mut(&b).unwrap().sub_mut(&b).unwrap();
            assert!(c.equals(&a).unwrap());
        }
    }

    #[test]
    fn check_zeros_and_random() {
        assert_eq!(&[0.0, 0.0, 0.0], Vector::zeros(3).as_slice());
        let mut random_generator = ChaCha8Rng::seed_from_u64(14);
        let v = Vector::random(100, &mut random_generator);
        assert_eq!(100, v.size());
        assert!(v.iter().all(|&x| (0.0..1.0).contains(&x)));
        let mut same_seed = ChaCha8Rng::seed_from_u64(14);
        assert_eq!(v, Vector::random(100, &mut same_seed));
    }

    #[test]
    fn check_norm() {
        assert_eq!(5.0, Vector::from(vec![3.0, 4.0]).norm());
        assert_eq!(0.0, Vector::zeros(3).norm());
    }
}
