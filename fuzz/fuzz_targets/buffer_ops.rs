#![no_main]

use libfuzzer_sys::fuzz_target;
use movebuf::{OwningBuffer, stats};

const SLOTS: usize = 4;

/// Expected contents of a slot: `None` for empty, `Some(n)` for `[0, n)`.
fn expected(len: Option<usize>) -> Vec<i32> {
    (0..len.unwrap_or(0)).map(|i| i as i32).collect()
}

fuzz_target!(|data: Vec<u8>| {
    let before = stats::snapshot();

    {
        let mut slots: [OwningBuffer; SLOTS] = Default::default();
        let mut model: [Option<usize>; SLOTS] = [None; SLOTS];

        for op in data.chunks(3) {
            let kind = op[0] % 7;
            let i = op.get(1).copied().unwrap_or(0) as usize % SLOTS;
            let j = op.get(2).copied().unwrap_or(1) as usize % SLOTS;

            match kind {
                0 => {
                    // Sized construction into slot i
                    let len = op.get(2).copied().unwrap_or(0) as usize;
                    slots[i] = OwningBuffer::sized(len).unwrap();
                    model[i] = (len > 0).then_some(len);
                }
                1 if i != j => {
                    // Copy assignment
                    let (dst, src) = pair(&mut slots, i, j);
                    dst.copy_assign(src).unwrap();
                    model[i] = model[j];
                }
                2 if i != j => {
                    // Move assignment
                    let (dst, src) = pair(&mut slots, i, j);
                    let id = src.storage_id();
                    dst.move_assign(src);
                    assert_eq!(dst.storage_id(), id);
                    assert!(src.is_empty());
                    model[i] = model[j].take();
                }
                3 if i != j => {
                    // Copy swap
                    let (a, b) = pair(&mut slots, i, j);
                    a.copy_swap(b).unwrap();
                    model.swap(i, j);
                }
                4 if i != j => {
                    // Move swap
                    let (a, b) = pair(&mut slots, i, j);
                    let (ida, idb) = (a.storage_id(), b.storage_id());
                    let traffic = stats::snapshot();
                    a.move_swap(b);
                    assert_eq!(stats::snapshot().since(&traffic).allocations, 0);
                    assert_eq!((a.storage_id(), b.storage_id()), (idb, ida));
                    model.swap(i, j);
                }
                5 => {
                    // Move construction out of slot i, then drop
                    let moved = slots[i].take();
                    assert_eq!(moved.as_slice(), expected(model[i]).as_slice());
                    model[i] = None;
                }
                _ => {
                    // Copy construction, then drop
                    let copy = slots[i].try_clone().unwrap();
                    assert_eq!(copy, slots[i]);
                    assert_eq!(copy.digest(), slots[i].digest());
                    if !copy.is_empty() {
                        assert_ne!(copy.storage_id(), slots[i].storage_id());
                    }
                }
            }

            // Invariants: contents follow the model, no two slots share storage
            for (slot, len) in slots.iter().zip(model.iter()) {
                assert_eq!(slot.as_slice(), expected(*len).as_slice());
                assert_eq!(slot.storage_id().is_some(), len.is_some());
            }
            let mut ids: Vec<_> = slots.iter().filter_map(OwningBuffer::storage_id).collect();
            let total = ids.len();
            ids.sort();
            ids.dedup();
            assert_eq!(ids.len(), total);
        }
    }

    // Every allocation has been released exactly once
    assert!(stats::snapshot().since(&before).is_balanced());
});

fn pair(
    slots: &mut [OwningBuffer; SLOTS],
    i: usize,
    j: usize,
) -> (&mut OwningBuffer, &mut OwningBuffer) {
    debug_assert_ne!(i, j);
    if i < j {
        let (left, right) = slots.split_at_mut(j);
        (&mut left[i], &mut right[0])
    } else {
        let (left, right) = slots.split_at_mut(i);
        (&mut right[0], &mut left[j])
    }
}
