#[cfg(test)]
mod tests_abi_lists {
    use std::ffi::CString;

    use runa_runtime::abi::*;
    use runa_runtime::list::NOT_FOUND;
    use runa_runtime::FIXED_POINT_SCALE;

    fn contents(list: *const runa_runtime::RunaList) -> Vec<i64> {
        (0..list_length(list)).map(|i| list_get(list, i)).collect()
    }

    #[test]
    fn test_handle_lifecycle() {
        let list = list_create();
        assert_eq!(list_length(list), 0);

        for value in [30, 10, 20] {
            list_append(list, value);
        }
        list_insert(list, 0, 5);
        list_set(list, 3, 25);
        assert_eq!(contents(list), vec![5, 30, 10, 25]);

        assert_eq!(list_remove(list, 1), 30);
        assert_eq!(list_find(list, 25), 2);
        assert_eq!(list_find(list, 99), NOT_FOUND);

        list_sort(list);
        assert_eq!(contents(list), vec![5, 10, 25]);
        list_reverse(list);
        assert_eq!(contents(list), vec![25, 10, 5]);
        assert_eq!(list_get_integer(list, 0), 25);

        list_clear(list);
        assert_eq!(list_length(list), 0);
        list_destroy(list);
    }

    #[test]
    fn test_copy_and_merge_own_new_storage() {
        let a = list_create();
        let b = list_create();
        list_append(a, 1);
        list_append(a, 2);
        list_append(b, 3);

        let copied = list_copy(a);
        let merged = list_merge(a, b);
        list_append(copied, 9);
        list_set(merged, 0, 100);

        assert_eq!(contents(a), vec![1, 2]);
        assert_eq!(contents(b), vec![3]);
        assert_eq!(contents(copied), vec![1, 2, 9]);
        assert_eq!(contents(merged), vec![100, 2, 3]);

        for handle in [a, b, copied, merged] {
            list_destroy(handle);
        }
    }

    #[test]
    fn test_destroy_null_is_noop() {
        list_destroy(std::ptr::null_mut());
    }

    #[test]
    fn test_math_entry_points_use_one_scale() {
        assert_eq!(runtime_sqrt(9 * FIXED_POINT_SCALE), 3 * FIXED_POINT_SCALE);
        assert_eq!(runtime_pow(3 * FIXED_POINT_SCALE, 2), 9 * FIXED_POINT_SCALE);
        assert_eq!(runtime_floor(-1_500_000), -2 * FIXED_POINT_SCALE);
        assert_eq!(runtime_ceil(-1_500_000), -FIXED_POINT_SCALE);
        assert_eq!(runtime_min(3, -3), -3);
        assert_eq!(runtime_max(3, -3), 3);
        assert_eq!(runtime_sin(90), FIXED_POINT_SCALE);
    }

    #[test]
    fn test_assert_passes_on_nonzero() {
        let message = CString::new("unreachable").unwrap();
        runtime_assert(1, message.as_ptr());
    }
}
