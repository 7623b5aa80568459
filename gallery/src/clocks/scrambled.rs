//! Faces that lie on purpose. Each owns the generator handed to it on activation.

use super::Clock;
use crate::time::ClockTime;
use clock_core::Xor128;

const UNSEEDED: u64 = 0;

pub(crate) struct ShuffledClock {
    rng: Xor128,
}

impl Default for ShuffledClock {
    fn default() -> Self {
        Self {
            rng: Xor128::new(UNSEEDED),
        }
    }
}

impl Clock for ShuffledClock {
    fn id(&self) -> &'static str {
        "shuffled"
    }

    fn title(&self) -> &'static str {
        "Shuffled"
    }

    fn description(&self) -> &'static str {
        "The exact current time, every character of it, in a fresh order each frame."
    }

    fn reset(&mut self, rng: Xor128) {
        self.rng = rng;
    }

    fn readout(&mut self, time: &ClockTime) -> String {
        self.rng.shuffle_text(&time.bare_stamp())
    }
}

pub(crate) struct Xor128Clock {
    rng: Xor128,
}

impl Default for Xor128Clock {
    fn default() -> Self {
        Self {
            rng: Xor128::new(UNSEEDED),
        }
    }
}

impl Clock for Xor128Clock {
    fn id(&self) -> &'static str {
        "xor128"
    }

    fn title(&self) -> &'static str {
        "XOR128"
    }

    fn description(&self) -> &'static str {
        "Every digit is a random draw, except a single one that tells the truth."
    }

    fn reset(&mut self, rng: Xor128) {
        self.rng = rng;
    }

    fn readout(&mut self, time: &ClockTime) -> String {
        let stamp = time.bare_stamp();
        let digits = stamp.chars().filter(char::is_ascii_digit).count() as i64;
        let honest = self.rng.int_range(0, digits - 1);

        let mut seen = 0i64;
        stamp
            .chars()
            .map(|c| {
                if !c.is_ascii_digit() {
                    return c;
                }
                let keep = seen == honest;
                seen += 1;
                if keep {
                    c
                } else {
                    char::from(b'0' + self.rng.int_range(0, 9) as u8)
                }
            })
            .collect()
    }
}

pub(crate) struct OnlyOneRightClock {
    rng: Xor128,
}

impl Default for OnlyOneRightClock {
    fn default() -> Self {
        Self {
            rng: Xor128::new(UNSEEDED),
        }
    }
}

impl OnlyOneRightClock {
    const CHOICES: i64 = 4;

    fn stamp(hours: u64, minutes: u64, seconds: u64) -> String {
        format!("{hours:02}:{minutes:02}:{seconds:02}")
    }
}

impl Clock for OnlyOneRightClock {
    fn id(&self) -> &'static str {
        "only-one-right"
    }

    fn title(&self) -> &'static str {
        "Only One Right"
    }

    fn description(&self) -> &'static str {
        "Four times on screen. One of them is correct."
    }

    fn reset(&mut self, rng: Xor128) {
        self.rng = rng;
    }

    fn readout(&mut self, time: &ClockTime) -> String {
        let honest = self.rng.int_range(0, Self::CHOICES - 1);
        (0..Self::CHOICES)
            .map(|slot| {
                if slot == honest {
                    Self::stamp(
                        time.hours as u64,
                        time.minutes as u64,
                        time.seconds as u64,
                    )
                } else {
                    Self::stamp(
                        self.rng.int_range(0, 23) as u64,
                        self.rng.int_range(0, 59) as u64,
                        self.rng.int_range(0, 59) as u64,
                    )
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    }
}
