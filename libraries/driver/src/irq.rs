use hal::InterruptMask;

/// Masks interrupts for as long as it lives.
///
/// The previous state is restored on drop, so every exit from the masked
/// region restores it, early returns and aborted retry loops included.
pub struct IrqGuard<'a, I: InterruptMask> {
    mask: &'a mut I,
    state: I::State,
}

impl<'a, I: InterruptMask> IrqGuard<'a, I> {
    pub fn new(mask: &'a mut I) -> Self {
        let state = mask.disable();
        Self { mask, state }
    }
}

impl<I: InterruptMask> Drop for IrqGuard<'_, I> {
    fn drop(&mut self) {
        self.mask.restore(self.state);
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use hal::mock::SpyMask;

    #[test]
    fn test_guard_restores_on_drop() {
        let mut mask = SpyMask::default();
        {
            let _guard = IrqGuard::new(&mut mask);
        }
        assert!(!mask.is_masked());
        assert_eq!(mask.disables(), 1);
        assert_eq!(mask.restores(), 1);
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn masked_search(mask: &mut SpyMask, items: &[u8]) -> Option<u8> {
            let _guard = IrqGuard::new(mask);
            for &item in items {
                if item == 3 {
                    return Some(item);
                }
            }
            None
        }

        let mut mask = SpyMask::default();
        assert_eq!(masked_search(&mut mask, &[1, 2, 3, 4]), Some(3));
        assert!(!mask.is_masked());
        assert_eq!(masked_search(&mut mask, &[]), None);
        assert_eq!(mask.restores(), 2);
    }

    #[test]
    fn test_guard_holds_critical_section_until_drop() {
        use hal::CriticalSectionMask;
        use std::sync::atomic::{AtomicBool, Ordering};
        use std::sync::Arc;
        use std::thread;
        use std::time::Duration;

        let mut mask = CriticalSectionMask;
        let entered = Arc::new(AtomicBool::new(false));
        let handle = {
            let _guard = IrqGuard::new(&mut mask);
            let flag = entered.clone();
            let handle = thread::spawn(move || {
                critical_section::with(|_| flag.store(true, Ordering::SeqCst));
            });
            thread::sleep(Duration::from_millis(50));
            assert!(!entered.load(Ordering::SeqCst));
            handle
        };
        handle.join().unwrap();
        assert!(entered.load(Ordering::SeqCst));
    }

    #[test]
    fn test_nested_guards_restore_outer_state() {
        let mut mask = SpyMask::default();
        let outer = mask.disable();
        {
            let _guard = IrqGuard::new(&mut mask);
        }
        assert!(mask.is_masked(), "inner guard must restore to the outer masked state");
        mask.restore(outer);
        assert!(!mask.is_masked());
    }
}
