use std::rc::Rc;

use nexus_list::{Adapter, AdapterType, Comparator, List, ListError};

// =============================================================================
// Adapter scenarios
// =============================================================================

#[test]
fn stack_push_peek_pop() {
    let mut stack = List::create(AdapterType::Stack, None).unwrap();
    stack.push(1).unwrap();
    stack.push(2).unwrap();
    stack.push(3).unwrap();

    assert_eq!(stack.peek_next(), Ok(&3));
    assert_eq!(stack.pop(), Ok(3));
    assert_eq!(stack.pop(), Ok(2));
    assert_eq!(stack.len(), 1);
}

#[test]
fn default_behaves_as_stack() {
    let mut list = List::create(AdapterType::Default, None).unwrap();
    assert_eq!(list.adapter(), Adapter::Stack);

    list.push('a').unwrap();
    list.push('b').unwrap();
    assert_eq!(list.pop(), Ok('b'));
}

#[test]
fn priority_iterates_ascending() {
    let mut prio = List::create(AdapterType::PriorityList, Some(Comparator::natural())).unwrap();
    prio.push(5).unwrap();
    prio.push(1).unwrap();
    prio.push(3).unwrap();

    let order: Vec<_> = prio.iter().copied().collect();
    assert_eq!(order, vec![1, 3, 5]);
}

#[test]
fn descending_priority_with_reversed_comparator() {
    let mut prio = List::priority(Comparator::natural().reversed());
    for v in [2, 9, 4] {
        prio.push(v).unwrap();
    }
    assert_eq!(prio.pop(), Ok(9));
    assert_eq!(prio.peek_other_end(), Ok(&2));
}

// =============================================================================
// Cursor scenarios
// =============================================================================

#[test]
fn cursor_from_tail_move_read_get() {
    let mut list = List::queue();
    for v in [10, 20, 30] {
        list.push(v).unwrap();
    }

    let mut cursor = list.cursor(false);
    cursor.move_by(&list, -1).unwrap();
    assert_eq!(cursor.read(&list), Ok(&20));

    assert_eq!(cursor.get(&mut list), Ok(20));
    assert_eq!(cursor.read(&list), Ok(&10));

    cursor.close(&mut list).unwrap();
}

#[test]
fn cursor_walk_and_filter() {
    let mut list = List::queue();
    for v in 1..=10 {
        list.push(v).unwrap();
    }

    // Remove every even element with a cursor walking head to tail
    let mut cursor = list.cursor(true);
    loop {
        let value = *cursor.read(&list).unwrap();
        if value % 2 == 0 {
            cursor.get(&mut list).unwrap();
        }
        if cursor.move_by(&list, 1).is_err() {
            break;
        }
    }
    cursor.close(&mut list).unwrap();

    let left: Vec<_> = list.iter().copied().collect();
    assert_eq!(left, vec![1, 3, 5, 7, 9]);
    list.check_invariants();
}

#[test]
fn many_cursors_and_end_operations() {
    let mut list = List::queue();
    for v in 0..5 {
        list.push(v).unwrap();
    }

    let head = list.cursor(true);
    let mut tail = list.cursor(false);
    let mut mid = list.cursor(true);
    mid.move_by(&list, 2).unwrap();

    // The queue keeps serving its own verbs while cursors are open
    assert_eq!(list.pop(), Ok(0));
    list.push(5).unwrap();

    assert_eq!(head.read(&list), Err(ListError::Invalidated));
    assert_eq!(mid.read(&list), Ok(&2));
    tail.move_by(&list, 1).unwrap();
    assert_eq!(tail.read(&list), Ok(&5));

    let mut list = list.destroy().unwrap_err().into_inner();
    for cursor in [head, tail, mid] {
        cursor.close(&mut list).unwrap();
    }
    assert!(list.destroy().is_ok());
}

// =============================================================================
// Position and value round trips
// =============================================================================

#[test]
fn add_at_read_at_remove_at() {
    let mut list = List::create(AdapterType::Queue, Some(Comparator::natural())).unwrap();
    for v in [1, 2, 4, 5] {
        list.push(v).unwrap();
    }

    list.add_at(3, 2).unwrap();
    assert_eq!(list.read_at(2), Ok(&3));
    assert_eq!(list.contains(&3), Ok(true));

    let len = list.len();
    assert_eq!(list.remove_at(2), Ok(3));
    assert_eq!(list.len(), len - 1);
    assert_eq!(list.read_find(&3), Err(ListError::NotFound));
}

#[test]
fn payloads_stay_with_caller() {
    let shared = Rc::new(String::from("payload"));
    let mut list = List::queue();

    list.push(Rc::clone(&shared)).unwrap();
    let back = list.pop().unwrap();

    assert!(Rc::ptr_eq(&back, &shared));
    assert_eq!(Rc::strong_count(&shared), 2);
}

#[test]
fn errors_leave_list_untouched() {
    let mut list = List::stack();
    for v in [1, 2, 3] {
        list.push(v).unwrap();
    }

    assert_eq!(list.add_at(0, 4), Err(ListError::IndexOutOfRange));
    assert_eq!(list.read_at(3), Err(ListError::IndexOutOfRange));
    assert_eq!(list.remove_at(3), Err(ListError::IndexOutOfRange));
    assert_eq!(list.edit_at(0, 3), Err(ListError::IndexOutOfRange));
    assert_eq!(list.add_sorted(0), Err(ListError::MissingComparator));
    assert_eq!(list.remove_find(&1), Err(ListError::MissingComparator));

    assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 3]);
    list.check_invariants();
}
