//! TIMG0 timer-group tick source.
//!
//! Timer 0 of timer group 0, programmed as a free-running up-counter with an
//! 80 divider: at the 80 MHz APB clock that is one tick per microsecond.
//! Pair this source with a clock calibrated to 1 tick/us; the rest of the
//! timestamp logic is unchanged.
//!
//! Unlike the cycle counter, a read is not a single instruction: the 64-bit
//! timer value must first be latched by writing T0UPDATE, then T0LO read
//! back once the latch completes.

use tickstamp_core::traits::TickSource;

#[cfg(feature = "esp32s3")]
mod regs {
    pub const T0CONFIG: *mut u32 = 0x6001_F000 as *mut u32;
    pub const T0LO: *mut u32 = 0x6001_F004 as *mut u32;
    pub const T0UPDATE: *mut u32 = 0x6001_F00C as *mut u32;
    pub const T0LOAD_LO: *mut u32 = 0x6001_F018 as *mut u32;
    pub const T0LOAD_HI: *mut u32 = 0x6001_F01C as *mut u32;
    pub const T0LOAD: *mut u32 = 0x6001_F020 as *mut u32;
}

#[cfg(not(feature = "esp32s3"))]
mod regs {
    pub const T0CONFIG: *mut u32 = 0x3FF5_F000 as *mut u32;
    pub const T0LO: *mut u32 = 0x3FF5_F004 as *mut u32;
    pub const T0UPDATE: *mut u32 = 0x3FF5_F00C as *mut u32;
    pub const T0LOAD_LO: *mut u32 = 0x3FF5_F018 as *mut u32;
    pub const T0LOAD_HI: *mut u32 = 0x3FF5_F01C as *mut u32;
    pub const T0LOAD: *mut u32 = 0x3FF5_F020 as *mut u32;
}

/// APB prescaler producing 1 MHz from the 80 MHz bus clock.
const DIVIDER: u32 = 80;

const CONFIG_ENABLE: u32 = 1 << 31;
const CONFIG_INCREASE: u32 = 1 << 30;
const CONFIG_DIVIDER_SHIFT: u32 = 13;

/// TIMG0 timer-0 tick source (1 tick = 1 us).
#[derive(Debug, Clone, Copy, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimerGroupTicks;

impl TimerGroupTicks {
    /// Programs timer 0 as a free-running up-counter from zero.
    ///
    /// # Safety
    ///
    /// Takes over TIMG0 timer 0: the caller must ensure nothing else (IDF
    /// drivers included) is using it, and that the APB clock is running at
    /// 80 MHz.
    pub unsafe fn init() {
        core::ptr::write_volatile(
            regs::T0CONFIG,
            core::ptr::read_volatile(regs::T0CONFIG) & !CONFIG_ENABLE,
        );
        core::ptr::write_volatile(regs::T0LOAD_LO, 0);
        core::ptr::write_volatile(regs::T0LOAD_HI, 0);
        core::ptr::write_volatile(regs::T0LOAD, 1);
        core::ptr::write_volatile(
            regs::T0CONFIG,
            (DIVIDER << CONFIG_DIVIDER_SHIFT) | CONFIG_ENABLE | CONFIG_INCREASE,
        );
    }
}

impl TickSource for TimerGroupTicks {
    /// Latch-and-poll read of the low 32 timer bits.
    ///
    /// The spin on T0UPDATE has no timeout: it completes only when the
    /// peripheral latches the timer value, which is within a few APB cycles
    /// on working hardware but unbounded if the timer group is unclocked or
    /// held in reset.
    fn now_ticks(&self) -> u32 {
        // Safety: fixed TIMG0 register addresses, 32-bit aligned volatile
        // accesses; init() must have configured the timer.
        unsafe {
            core::ptr::write_volatile(regs::T0UPDATE, 1);
            while core::ptr::read_volatile(regs::T0UPDATE) != 0 {
                core::hint::spin_loop();
            }
            core::ptr::read_volatile(regs::T0LO)
        }
    }
}
