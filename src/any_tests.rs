// src/any_tests.rs
#[cfg(test)]
mod tests {
    use crate::{any_cast, any_cast_mut, any_cast_ref, make_any, make_any_list, AnyValue, ValueType};
    use alloc::rc::Rc;
    use alloc::string::{String, ToString};
    use alloc::vec;
    use alloc::vec::Vec;
    use core::cell::Cell;

    // Counts live instances through a shared counter
    #[derive(Debug)]
    struct Tracked {
        live: Rc<Cell<usize>>,
        id: u32,
    }

    impl Tracked {
        fn new(live: &Rc<Cell<usize>>, id: u32) -> Self {
            live.set(live.get() + 1);
            Self {
                live: Rc::clone(live),
                id,
            }
        }
    }

    impl Clone for Tracked {
        fn clone(&self) -> Self {
            Tracked::new(&self.live, self.id)
        }
    }

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn test_empty_container() {
        let value = AnyValue::new();
        assert!(!value.has_value());
        assert_eq!(value.value_type(), ValueType::none());
        assert!(value.value_type().is_none());
        assert!(value.downcast_ref::<i32>().is_none());

        let defaulted = AnyValue::default();
        assert!(!defaulted.has_value());
    }

    #[test]
    fn test_basic_scenario() {
        let mut a = AnyValue::from_value(5i32);
        assert_eq!(any_cast::<i32>(&a), Ok(5));

        *a.cast_mut::<i32>().unwrap() = 10;
        assert_eq!(any_cast::<i32>(&a), Ok(10));

        a.set("Meow");
        assert_eq!(a.cast::<&str>(), Ok("Meow"));
        assert!(a.cast::<i32>().is_err());
    }

    #[test]
    fn test_exact_type_identity() {
        let value = AnyValue::from_value(42u8);
        assert!(value.is::<u8>());
        assert!(!value.is::<i32>());
        assert_eq!(value.value_type(), ValueType::of::<u8>());
        assert_ne!(value.value_type(), ValueType::of::<u16>());
        assert!(value.value_type().name().contains("u8"));

        assert!(any_cast_ref::<u16>(Some(&value)).is_none());
        assert_eq!(any_cast_ref::<u8>(Some(&value)), Some(&42));
        assert!(any_cast_ref::<u8>(None).is_none());
    }

    #[test]
    fn test_extracted_address_differs() {
        let original = String::from("hello");
        let value = AnyValue::from_value(original.clone());
        let held = value.cast_ref::<String>().unwrap();
        assert_eq!(held, &original);
        assert_ne!(held as *const String, &original as *const String);
    }

    #[test]
    fn test_clone_is_deep() {
        let mut original = AnyValue::from_value(vec![1, 2, 3]);
        let mut copy = original.clone();

        copy.cast_mut::<Vec<i32>>().unwrap().push(4);
        assert_eq!(original.cast_ref::<Vec<i32>>().unwrap(), &vec![1, 2, 3]);
        assert_eq!(copy.cast_ref::<Vec<i32>>().unwrap(), &vec![1, 2, 3, 4]);

        original.reset();
        assert_eq!(copy.cast::<Vec<i32>>().unwrap().len(), 4);
    }

    #[test]
    fn test_take_drains_source() {
        let mut source = AnyValue::from_value(String::from("moved"));
        let target = source.take();
        assert!(!source.has_value());
        assert_eq!(target.cast::<String>().unwrap(), "moved");
    }

    #[test]
    fn test_nested_container_is_adopted() {
        let inner = AnyValue::from_value(7i64);
        let outer = AnyValue::from_value(inner);
        assert!(outer.is::<i64>());
        assert!(!outer.is::<AnyValue>());

        let mut target = AnyValue::new();
        target.set(AnyValue::from_value(1u32));
        assert_eq!(target.cast::<u32>(), Ok(1));
    }

    #[test]
    fn test_in_place_and_list_construction() {
        let pair = AnyValue::in_place(|| (1, 2));
        assert_eq!(pair.cast::<(i32, i32)>(), Ok((1, 2)));

        let list = AnyValue::from_list::<Vec<i32>, _>([42, 666]);
        assert_eq!(list.cast_ref::<Vec<i32>>().unwrap(), &vec![42, 666]);

        let made = make_any(|| "made".to_string());
        assert_eq!(made.cast::<String>().unwrap(), "made");

        let collected = make_any_list::<String, _>(['a', 'b']);
        assert_eq!(collected.cast::<String>().unwrap(), "ab");
    }

    #[test]
    fn test_emplace_returns_held_value() {
        let mut value = AnyValue::from_value(1u8);
        let held = value.emplace(|| String::from("fresh"));
        held.push('!');
        assert_eq!(value.cast::<String>().unwrap(), "fresh!");

        let list = value.emplace_list::<Vec<u8>, _>([9, 8]);
        list.push(7);
        assert_eq!(value.cast::<Vec<u8>>().unwrap(), vec![9, 8, 7]);
    }

    #[test]
    fn test_swap_and_self_swap() {
        let mut a = AnyValue::from_value(1i32);
        let mut b = AnyValue::from_value(String::from("two"));
        a.swap(&mut b);
        assert_eq!(a.cast::<String>().unwrap(), "two");
        assert_eq!(b.cast::<i32>(), Ok(1));

        let mut empty = AnyValue::new();
        a.swap(&mut empty);
        assert!(!a.has_value());
        assert!(empty.is::<String>());
    }

    #[test]
    fn test_lifetimes_are_balanced() {
        let live = Rc::new(Cell::new(0));
        {
            let mut value = AnyValue::from_value(Tracked::new(&live, 1));
            assert_eq!(live.get(), 1);

            let copy = value.clone();
            assert_eq!(live.get(), 2);

            let mut other = AnyValue::new();
            other.assign(&copy);
            assert_eq!(live.get(), 3);

            value.emplace(|| 5u32);
            assert_eq!(live.get(), 2);

            other.assign_from(value.take());
            assert_eq!(live.get(), 1);
            assert!(!value.has_value());
        }
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_into_value_moves_out() {
        let live = Rc::new(Cell::new(0));
        let value = AnyValue::from_value(Tracked::new(&live, 9));
        let tracked = value.into_value::<Tracked>().unwrap();
        assert_eq!(tracked.id, 9);
        assert_eq!(live.get(), 1);
        drop(tracked);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_try_into_value_returns_container_on_mismatch() {
        let value = AnyValue::from_value(3.5f64);
        let value = match value.try_into_value::<f32>() {
            Ok(_) => panic!("f64 must not come out as f32"),
            Err(value) => value,
        };
        assert_eq!(value.try_into_value::<f64>().ok(), Some(3.5));
    }

    #[test]
    fn test_try_into_value_never_drops_held_value() {
        let live = Rc::new(Cell::new(0));
        let value = AnyValue::from_value(Tracked::new(&live, 4));

        let value = match value.try_into_value::<u32>() {
            Ok(_) => panic!("Tracked must not come out as u32"),
            Err(value) => value,
        };
        assert_eq!(live.get(), 1);
        assert!(value.is::<Tracked>());

        let tracked = match value.try_into_value::<Tracked>() {
            Ok(tracked) => tracked,
            Err(_) => panic!("held Tracked was lost"),
        };
        assert_eq!(tracked.id, 4);
        assert_eq!(live.get(), 1);
        drop(tracked);
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_pointer_form_mutation() {
        let mut value = AnyValue::from_value(10u64);
        if let Some(n) = any_cast_mut::<u64>(Some(&mut value)) {
            *n += 1;
        }
        assert!(any_cast_mut::<i64>(Some(&mut value)).is_none());
        assert_eq!(value.cast::<u64>(), Ok(11));
    }

    #[test]
    fn test_debug_shows_type() {
        let value = AnyValue::from_value(1i16);
        let rendered = alloc::format!("{:?}", value);
        assert!(rendered.contains("i16"));
        assert!(alloc::format!("{:?}", AnyValue::new()).contains("<none>"));
    }
}
