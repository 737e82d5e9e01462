use packed_vec::{FreeBlock, PackedVec};

#[test]
fn test_iterator_empty() {
    let packed: PackedVec<u8> = PackedVec::new();

    let mut iter = packed.iter();
    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert_eq!(iter.next(), None);
    assert_eq!(packed.free_blocks().next(), None);
}

#[test]
fn test_iterator_skips_free_blocks() {
    let mut packed: PackedVec<char> = "abcdefg".chars().collect();
    packed.erase(0);
    packed.erase(2);
    packed.erase(3);
    packed.erase(6);

    let mut iter = packed.iter();
    assert_eq!(iter.size_hint(), (3, Some(3)));
    assert_eq!(iter.next(), Some((1, &'b')));
    assert_eq!(iter.size_hint(), (2, Some(2)));
    assert_eq!(iter.next(), Some((4, &'e')));
    assert_eq!(iter.next(), Some((5, &'f')));
    assert_eq!(iter.size_hint(), (0, Some(0)));
    assert_eq!(iter.next(), None);
    assert_eq!(iter.next(), None);
}

#[test]
fn test_iterator_all_free() {
    let mut packed: PackedVec<u8> = (0..4).collect();
    for index in [1, 3, 0, 2] {
        packed.erase(index);
    }

    assert_eq!(packed.iter().count(), 0);
    assert_eq!(packed.indices().len(), 0);
}

#[test]
fn test_indices() {
    let mut packed: PackedVec<u8> = (0..6).collect();
    packed.erase(1);
    packed.erase(4);

    let indices: Vec<usize> = packed.indices().collect();
    assert_eq!(indices, [0, 2, 3, 5]);
    assert!(indices.iter().all(|&index| packed.is_valid(index)));
}

#[test]
fn test_iter_mut_updates_only_occupied() {
    let mut packed: PackedVec<u32> = (1..=5).collect();
    packed.erase(2);

    for (_, value) in packed.iter_mut() {
        *value *= 10;
    }

    assert_eq!(packed[0], 10);
    assert_eq!(packed[1], 20);
    assert_eq!(packed[2], 0);
    assert_eq!(packed[3], 40);
    assert_eq!(packed[4], 50);
}

#[test]
fn test_into_iterator_for_references() {
    let mut packed: PackedVec<u32> = (0..3).collect();

    for (index, value) in &mut packed {
        *value += u32::try_from(index).unwrap();
    }

    let mut seen = Vec::new();
    for (index, value) in &packed {
        seen.push((index, *value));
    }
    assert_eq!(seen, [(0, 0), (1, 2), (2, 4)]);
}

#[test]
fn test_into_iter_yields_owned_values() {
    let mut packed: PackedVec<String> = ["x", "y", "z"].iter().map(|s| s.to_string()).collect();
    packed.erase(1);

    let owned: Vec<(usize, String)> = packed.into_iter().collect();
    assert_eq!(owned, [(0, String::from("x")), (2, String::from("z"))]);
}

#[test]
fn test_iterator_clone_is_independent() {
    let packed: PackedVec<u8> = (0..3).collect();

    let mut iter = packed.iter();
    iter.next();
    let snapshot = iter.clone();

    assert_eq!(iter.count(), 2);
    assert_eq!(snapshot.map(|(index, _)| index).collect::<Vec<_>>(), [1, 2]);
}

#[test]
fn test_free_blocks_iterator() {
    let mut packed: PackedVec<u8> = (0..10).collect();
    for index in [8, 1, 2, 5] {
        packed.erase(index);
    }

    let blocks = packed.free_blocks();
    assert_eq!(blocks.len(), 3);
    assert_eq!(
        blocks.collect::<Vec<_>>(),
        [
            FreeBlock::new(1, 2),
            FreeBlock::new(5, 1),
            FreeBlock::new(8, 1)
        ]
    );
    assert_eq!(packed.free_blocks().next_back(), Some(FreeBlock::new(8, 1)));
}

#[test]
fn test_free_block_helpers() {
    let block = FreeBlock::new(3, 4);

    assert_eq!(block.end(), 7);
    assert!(block.contains(3));
    assert!(block.contains(6));
    assert!(!block.contains(2));
    assert!(!block.contains(7));
}
