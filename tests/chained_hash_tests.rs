//! Unit tests for ChainedHashTable: multiset membership, duplicate
//! enumeration with resumed searches, and the bucket-order linear
//! cursor.

use cursory::prelude::*;
use rstest::rstest;

// =============================================================================
// Construction Tests
// =============================================================================

#[rstest]
fn test_new_creates_empty_table() {
    let table: ChainedHashTable<i32> = ChainedHashTable::new(16);
    assert!(table.is_empty());
    assert_eq!(table.len(), 0);
    assert_eq!(table.capacity(), 16);
    assert!(table.before());
}

#[rstest]
fn test_capacity_never_drops_below_one_bucket() {
    let table: ChainedHashTable<i32> = ChainedHashTable::new(0);
    assert_eq!(table.capacity(), 1);
}

// =============================================================================
// Multiset Tests
// =============================================================================

#[rstest]
fn test_duplicates_are_kept_and_counted() {
    let mut table = ChainedHashTable::new(8);
    for item in [5, 5, 12, 5, 30] {
        table.insert(item);
    }

    assert_eq!(table.len(), 5);
    assert_eq!(table.frequency(&5), 3);
    assert_eq!(table.frequency(&12), 1);
    assert_eq!(table.frequency(&99), 0);
}

#[rstest]
fn test_obtain_returns_a_stored_equal_item() {
    let mut table = ChainedHashTable::new(8);
    table.insert("bishop");

    assert_eq!(table.obtain(&"bishop"), Ok(&"bishop"));
    assert_eq!(table.obtain(&"queen"), Err(ContainerError::ItemNotFound));
}

// =============================================================================
// Search Mode Tests
// =============================================================================

#[rstest]
fn test_resumed_searches_enumerate_all_duplicates_then_stop() {
    let mut table = ChainedHashTable::new(8);
    for item in [5, 5, 12, 5, 30] {
        table.insert(item);
    }
    table.resume_searches();

    let mut found = 0;
    table.search(&5);
    while table.item_exists() {
        found += 1;
        table.search(&5);
    }

    assert_eq!(found, 3);
    assert!(!table.item_exists());
    assert!(table.after());
}

#[rstest]
fn test_restarted_searches_always_find_the_first_occurrence() {
    let mut table = ChainedHashTable::new(8);
    for item in [5, 5] {
        table.insert(item);
    }
    assert_eq!(table.search_mode(), SearchMode::Restart);

    table.search(&5);
    table.search(&5);

    assert!(table.item_exists());
}

#[rstest]
fn test_resume_after_go_before_starts_over() {
    let mut table = ChainedHashTable::new(8);
    table.insert(5);
    table.resume_searches();

    table.search(&5);
    assert!(table.item_exists());

    table.go_before();
    table.search(&5);
    assert!(table.item_exists());
}

#[rstest]
fn test_search_miss_lands_after() {
    let mut table = ChainedHashTable::new(8);
    table.insert(5);

    table.search(&6);

    assert!(table.after());
    assert_eq!(table.item(), Err(ContainerError::NoCurrentItem));
}

// =============================================================================
// Linear Cursor Tests
// =============================================================================

#[rstest]
fn test_full_traversal_visits_every_item_exactly_once() {
    let mut table = ChainedHashTable::new(4);
    for item in 0..25 {
        table.insert(item);
    }

    let mut seen = Vec::new();
    table.go_first().unwrap();
    while table.item_exists() {
        seen.push(*table.item().unwrap());
        table.go_forth().unwrap();
    }
    seen.sort_unstable();

    assert_eq!(seen, (0..25).collect::<Vec<i32>>());
    assert_eq!(table.go_forth(), Err(ContainerError::AfterTheEnd));
}

#[rstest]
fn test_go_first_on_empty_table_fails() {
    let mut table: ChainedHashTable<i32> = ChainedHashTable::new(4);
    assert_eq!(table.go_first(), Err(ContainerError::ContainerEmpty));
}

#[rstest]
fn test_saved_position_survives_unrelated_reads() {
    let mut table = ChainedHashTable::new(4);
    for item in [10, 20, 30] {
        table.insert(item);
    }

    table.go_first().unwrap();
    table.go_forth().unwrap();
    let item = *table.item().unwrap();
    let position = table.current_position();

    table.go_after();
    table.go_position(&position);

    assert_eq!(table.item(), Ok(&item));
}

// =============================================================================
// Deletion Tests
// =============================================================================

#[rstest]
fn test_delete_removes_a_single_occurrence() {
    let mut table = ChainedHashTable::new(8);
    for item in [5, 5, 12] {
        table.insert(item);
    }

    table.delete(&5).unwrap();

    assert_eq!(table.frequency(&5), 1);
    assert_eq!(table.len(), 2);
    assert_eq!(table.delete(&99), Err(ContainerError::ItemNotFound));
}

#[rstest]
fn test_delete_item_advances_to_the_successor() {
    let mut table = ChainedHashTable::new(8);
    for item in 0..5 {
        table.insert(item);
    }

    table.go_first().unwrap();
    let first = *table.item().unwrap();
    table.delete_item().unwrap();

    assert_eq!(table.len(), 4);
    if table.item_exists() {
        assert_ne!(*table.item().unwrap(), first);
    }

    assert!(!table.has(&first));
}

#[rstest]
fn test_delete_item_without_a_current_item_fails() {
    let mut table: ChainedHashTable<i32> = ChainedHashTable::new(4);
    assert_eq!(table.delete_item(), Err(ContainerError::NoCurrentItem));
}

#[rstest]
fn test_clear_keeps_the_bucket_count() {
    let mut table = ChainedHashTable::new(8);
    for item in 0..10 {
        table.insert(item);
    }

    table.clear();

    assert!(table.is_empty());
    assert_eq!(table.capacity(), 8);
    assert!(table.before());
}
