//! Deterministic faces: the readout depends on the timestamp alone.

use super::{meter, turn_glyph, Clock};
use crate::time::{ease_in_out_poly, ClockTime};
use std::f64::consts::TAU;

const WIDTH: usize = 20;
const ARROWS: [char; 8] = ['↑', '↗', '→', '↘', '↓', '↙', '←', '↖'];
const SPOKES: [char; 4] = ['|', '/', '-', '\\'];
const SHADES: [char; 5] = [' ', '░', '▒', '▓', '█'];
// Full-scale frequency of each hand: one sweep per second, 60 per minute and hour, 24 per day.
const HAND_FREQUENCIES: [f64; 4] = [1.0, 60.0, 60.0, 24.0];

pub(crate) struct Face {
    pub id: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    draw: fn(&ClockTime) -> String,
}

struct FaceClock {
    face: &'static Face,
}

impl Clock for FaceClock {
    fn id(&self) -> &'static str {
        self.face.id
    }

    fn title(&self) -> &'static str {
        self.face.title
    }

    fn description(&self) -> &'static str {
        self.face.description
    }

    fn readout(&mut self, time: &ClockTime) -> String {
        (self.face.draw)(time)
    }
}

pub(crate) fn face(face: &'static Face) -> Box<dyn Clock> {
    Box::new(FaceClock { face })
}

fn per_hand(time: &ClockTime, separator: &str, draw: impl Fn(usize, f64) -> String) -> String {
    time.normalized()
        .iter()
        .enumerate()
        .map(|(hand, &fraction)| draw(hand, fraction))
        .collect::<Vec<_>>()
        .join(separator)
}

/// One row of a sine wave, sampled `width` times; samples past `visible` are blank.
fn sine_row(width: usize, visible: usize, cycles: f64, phase: f64, amplitude: f64) -> String {
    const LEVELS: [char; 5] = ['_', '.', '-', '\'', '^'];
    (0..width)
        .map(|x| {
            if x >= visible {
                return ' ';
            }
            let theta = x as f64 / width as f64 * cycles * TAU + phase;
            let level = (theta.sin() * amplitude + 1.0) / 2.0;
            LEVELS[((level * (LEVELS.len() - 1) as f64).round() as usize).min(LEVELS.len() - 1)]
        })
        .collect()
}

fn draw_angle(time: &ClockTime) -> String {
    per_hand(time, " ", |_, fraction| turn_glyph(fraction, &ARROWS).to_string())
}

fn draw_bar(time: &ClockTime) -> String {
    per_hand(time, "\n", |hand, fraction| {
        let bar = meter(fraction, WIDTH, '█', '░');
        // Even bars hang upside down.
        if hand % 2 == 0 {
            bar.chars().rev().collect()
        } else {
            bar
        }
    })
}

fn draw_binary(time: &ClockTime) -> String {
    let bits = format!("{:064b}", time.epoch_ms);
    bits.as_bytes()
        .chunks(8)
        .map(|row| {
            row.iter()
                .map(|&bit| if bit == b'1' { '█' } else { '·' })
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw_circle(time: &ClockTime) -> String {
    const SIZES: [char; 5] = ['·', '∘', '○', '◯', '●'];
    let [a, b, c, d] = time
        .normalized()
        .map(|fraction| SIZES[((fraction * SIZES.len() as f64) as usize).min(SIZES.len() - 1)]);
    format!("{a} {b}\n{c} {d}")
}

fn draw_frequency_sine(time: &ClockTime) -> String {
    per_hand(time, "\n", |_, fraction| {
        sine_row(WIDTH, WIDTH, 1.0 + fraction * 8.0, 0.0, 1.0)
    })
}

fn draw_gear(time: &ClockTime) -> String {
    per_hand(time, " ", |_, fraction| {
        format!("({})", turn_glyph(fraction, &SPOKES))
    })
}

fn draw_lines_binary(time: &ClockTime) -> String {
    per_hand(time, " ", |_, fraction| {
        let byte = (fraction * 256.0) as u8;
        format!("{byte:08b}").replace('1', "|").replace('0', "-")
    })
}

fn draw_lines(time: &ClockTime) -> String {
    per_hand(time, "", |_, fraction| {
        turn_glyph(fraction, &['-', '\\', '|', '/']).to_string()
    })
}

fn draw_modulated_sine(time: &ClockTime) -> String {
    let [ms, seconds, minutes, hours] = time.normalized();
    let carrier = sine_row(WIDTH * 2, WIDTH * 2, 2.0 + minutes * 10.0, seconds * TAU, hours);
    let envelope = meter(ms, WIDTH * 2, '~', ' ');
    format!("{carrier}\n{envelope}")
}

fn draw_multiple_circles(time: &ClockTime) -> String {
    per_hand(time, "\n", |_, fraction| meter(fraction, 10, '○', '·'))
}

fn draw_polygon(time: &ClockTime) -> String {
    per_hand(time, " ", |_, fraction| {
        let sides = 3 + (fraction * 9.0) as usize;
        "◆".repeat(sides)
    })
}

fn draw_sine(time: &ClockTime) -> String {
    per_hand(time, "\n", |hand, fraction| {
        let visible = (fraction * WIDTH as f64) as usize;
        sine_row(WIDTH, visible, HAND_FREQUENCIES[hand], 0.0, 1.0)
    })
}

fn draw_small_circles(time: &ClockTime) -> String {
    per_hand(time, "\n", |_, fraction| meter(fraction, 10, '●', '○'))
}

fn draw_small_lines(time: &ClockTime) -> String {
    const COLS: usize = 7;
    let hands = time.normalized();
    (0..COLS)
        .map(|row| {
            (0..COLS)
                .map(|col| turn_glyph(hands[(row * COLS + col) % 4], &SPOKES))
                .collect::<String>()
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn draw_small_squares(time: &ClockTime) -> String {
    per_hand(time, "\n", |_, fraction| {
        // A square looks the same every quarter turn.
        let glyph = turn_glyph(fraction * 4.0, &['■', '◆']);
        std::iter::repeat(glyph).take(10).collect()
    })
}

fn draw_star(time: &ClockTime) -> String {
    per_hand(time, " ", |_, fraction| {
        turn_glyph(fraction, &['✦', '✧', '★', '☆']).to_string()
    })
}

fn draw_squares(time: &ClockTime) -> String {
    let [a, b, c, d] = time.normalized().map(|fraction| {
        let alpha = ease_in_out_poly(fraction, 5);
        SHADES[((alpha * (SHADES.len() - 1) as f64).round() as usize).min(SHADES.len() - 1)]
    });
    format!("[{a}{a}][{b}{b}]\n[{c}{c}][{d}{d}]")
}

fn draw_triangle(time: &ClockTime) -> String {
    per_hand(time, "\n", |_, fraction| {
        let length = (fraction * WIDTH as f64) as usize;
        format!("{:<width$}", format!("{}▶", "=".repeat(length)), width = WIDTH + 1)
    })
}

pub(crate) static ANGLE: Face = Face {
    id: "angle",
    title: "Angle",
    description: "Four arrows, one per hand, each pointing wherever its hand would.",
    draw: draw_angle,
};

pub(crate) static BAR: Face = Face {
    id: "bar",
    title: "Bars",
    description: "Four progress bars; every other one is hung upside down.",
    draw: draw_bar,
};

pub(crate) static BINARY: Face = Face {
    id: "binary",
    title: "Binary",
    description: "Milliseconds since 1970, written as an 8x8 grid of bits.",
    draw: draw_binary,
};

pub(crate) static CIRCLE: Face = Face {
    id: "circle",
    title: "Circles",
    description: "Four circles growing from a dot until their hand wraps around.",
    draw: draw_circle,
};

pub(crate) static FREQUENCY_SINE: Face = Face {
    id: "frequency-sine",
    title: "Frequency",
    description: "Four waves; the later it gets, the faster each one wiggles.",
    draw: draw_frequency_sine,
};

pub(crate) static GEAR: Face = Face {
    id: "gear",
    title: "Gears",
    description: "Four gears in a row, each turned by one hand.",
    draw: draw_gear,
};

pub(crate) static LINES_BINARY: Face = Face {
    id: "lines-binary",
    title: "Binary Lines",
    description: "Each hand quantized to a byte and drawn as standing and lying lines.",
    draw: draw_lines_binary,
};

pub(crate) static LINES: Face = Face {
    id: "lines",
    title: "Lines",
    description: "Four lines through the same center, all spinning at different speeds.",
    draw: draw_lines,
};

pub(crate) static MODULATED_SINE: Face = Face {
    id: "modulated-sine",
    title: "Modulation",
    description: "One wave: hours set the amplitude, minutes the frequency, seconds the phase.",
    draw: draw_modulated_sine,
};

pub(crate) static MULTIPLE_CIRCLES: Face = Face {
    id: "multiple-circles",
    title: "Many Circles",
    description: "Rows of circles counting up tenths of each hand.",
    draw: draw_multiple_circles,
};

pub(crate) static POLYGON: Face = Face {
    id: "polygon",
    title: "Polygons",
    description: "Polygons gaining corners as their hand advances.",
    draw: draw_polygon,
};

pub(crate) static SINE: Face = Face {
    id: "sine",
    title: "Sine",
    description: "Four waves revealed left to right as each hand advances.",
    draw: draw_sine,
};

pub(crate) static SMALL_CIRCLES: Face = Face {
    id: "small-circles",
    title: "Small Circles",
    description: "Ten small circles per hand, lit one by one.",
    draw: draw_small_circles,
};

pub(crate) static SMALL_LINES: Face = Face {
    id: "small-lines",
    title: "Small Lines",
    description: "A grid of tiny spinning lines, the four hands interleaved.",
    draw: draw_small_lines,
};

pub(crate) static SMALL_SQUARES: Face = Face {
    id: "small-squares",
    title: "Small Squares",
    description: "Rows of squares rotating with their hand.",
    draw: draw_small_squares,
};

pub(crate) static STAR: Face = Face {
    id: "star",
    title: "Stars",
    description: "Four stars cycling through their shapes.",
    draw: draw_star,
};

pub(crate) static SQUARES: Face = Face {
    id: "squares",
    title: "Squares",
    description: "Four squares filling in with an eased opacity.",
    draw: draw_squares,
};

pub(crate) static TRIANGLE: Face = Face {
    id: "triangle",
    title: "Triangles",
    description: "Four arrows stretching toward the right edge.",
    draw: draw_triangle,
};
