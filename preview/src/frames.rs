//! Built-in frame scripts

use myrtio_frame_composer::{
    Action, BLINKT_LED_COUNT, Frame, FrameEntry, FrameScript, Layers, OFF, Rgb, ScriptError,
    TickHook,
};

pub const LED_COUNT: usize = BLINKT_LED_COUNT;

const RAIN: Rgb = Rgb { r: 0, g: 0, b: 255 };
const SNOW: Rgb = Rgb {
    r: 180,
    g: 180,
    b: 180,
};
const SNOW_CAP: Rgb = Rgb {
    r: 60,
    g: 60,
    b: 70,
};
const FLASH_DIM: Rgb = Rgb {
    r: 100,
    g: 100,
    b: 100,
};
const FLASH: Rgb = Rgb {
    r: 255,
    g: 255,
    b: 255,
};
const SCANNER: Rgb = Rgb { r: 255, g: 0, b: 0 };
const SCANNER_TAIL: Rgb = Rgb { r: 60, g: 0, b: 0 };

type Builder = fn() -> Result<FrameScript<LED_COUNT>, ScriptError>;

const FRAMES: &[(&str, Builder)] = &[
    ("raindrop_falling", raindrop_falling),
    ("raindrop_dripping", raindrop_dripping),
    ("flood", flood),
    ("thunder_flash", thunder_flash),
    ("snow_falling", snow_falling),
    ("snow_layer", snow_layer),
    ("knight_rider", knight_rider),
    ("hue_cycle", hue_cycle),
];

/// Names of all built-in frame scripts
pub fn names() -> impl Iterator<Item = &'static str> {
    FRAMES.iter().map(|(name, _)| *name)
}

/// Build a frame script by name
pub fn by_name(name: &str) -> Option<Result<FrameScript<LED_COUNT>, ScriptError>> {
    FRAMES
        .iter()
        .find(|(known, _)| *known == name)
        .map(|(_, build)| build())
}

fn single(index: usize, color: Rgb) -> Frame<LED_COUNT> {
    let mut frame = [OFF; LED_COUNT];
    frame[index] = color;
    frame
}

fn delay(min: u16, max: u16) -> FrameEntry<LED_COUNT> {
    Action::variable_delay(min, max).into()
}

/// A drop falling down the strip, with a random pause on top
pub fn raindrop_falling() -> Result<FrameScript<LED_COUNT>, ScriptError> {
    let mut entries = vec![single(0, RAIN).into(), delay(1, 3)];
    entries.extend((1..LED_COUNT).map(|index| single(index, RAIN).into()));
    entries.push([OFF; LED_COUNT].into());
    entries.push(delay(0, 2));
    FrameScript::new(entries)
}

/// A drop that swells on top before it falls
pub fn raindrop_dripping() -> Result<FrameScript<LED_COUNT>, ScriptError> {
    let mut entries = vec![
        single(0, Rgb { r: 0, g: 0, b: 40 }).into(),
        Action::ShiftValue {
            step: 40,
            repeat: 5,
        }
        .into(),
        delay(2, 6),
    ];
    entries.extend((1..LED_COUNT).map(|index| single(index, RAIN).into()));
    entries.push([OFF; LED_COUNT].into());
    entries.push(delay(0, 4));
    FrameScript::new(entries)
}

/// Water rising from the far end, then draining
pub fn flood() -> Result<FrameScript<LED_COUNT>, ScriptError> {
    let mut entries: Vec<FrameEntry<LED_COUNT>> = (1..=LED_COUNT)
        .map(|level| {
            let mut frame = [OFF; LED_COUNT];
            for pixel in &mut frame[LED_COUNT - level..] {
                *pixel = RAIN;
            }
            frame.into()
        })
        .collect();
    entries.push(delay(3, 6));
    entries.push(
        Action::ShiftValue {
            step: -48,
            repeat: 5,
        }
        .into(),
    );
    entries.push([OFF; LED_COUNT].into());
    entries.push(delay(2, 2));
    FrameScript::new(entries)
}

/// One lightning strike, meant as an overwrite
pub fn thunder_flash() -> Result<FrameScript<LED_COUNT>, ScriptError> {
    let mut start = [OFF; LED_COUNT];
    for pixel in &mut start[..3] {
        *pixel = FLASH_DIM;
    }
    FrameScript::new(vec![start.into(), [FLASH; LED_COUNT].into()])
}

/// A flake drifting down at an uneven pace
pub fn snow_falling() -> Result<FrameScript<LED_COUNT>, ScriptError> {
    let mut entries: Vec<FrameEntry<LED_COUNT>> = Vec::with_capacity(LED_COUNT * 2 + 2);
    for index in 0..LED_COUNT {
        entries.push(single(index, SNOW).into());
        entries.push(delay(0, 1));
    }
    entries.push([OFF; LED_COUNT].into());
    entries.push(delay(1, 4));
    FrameScript::new(entries)
}

/// Snow lying at the bottom, meant as an underlay
pub fn snow_layer() -> Result<FrameScript<LED_COUNT>, ScriptError> {
    let mut frame = [OFF; LED_COUNT];
    for pixel in &mut frame[LED_COUNT - 2..] {
        *pixel = SNOW_CAP;
    }
    FrameScript::new(vec![frame.into()])
}

/// Red scanner bouncing between both ends
pub fn knight_rider() -> Result<FrameScript<LED_COUNT>, ScriptError> {
    let sweep = (0..LED_COUNT).chain((1..LED_COUNT - 1).rev());
    let frames = sweep.map(|index| {
        let mut frame = single(index, SCANNER);
        if index > 0 {
            frame[index - 1] = SCANNER_TAIL;
        }
        if index + 1 < LED_COUNT {
            frame[index + 1] = SCANNER_TAIL;
        }
        frame
    });
    Ok(FrameScript::from_frames(frames))
}

/// Whole strip walking around the color wheel
pub fn hue_cycle() -> Result<FrameScript<LED_COUNT>, ScriptError> {
    FrameScript::new(vec![
        [SCANNER; LED_COUNT].into(),
        Action::ShiftHue {
            step: 8,
            repeat: 31,
        }
        .into(),
    ])
}

/// Tick hook starting a thunder flash now and then
pub struct Thunder {
    flash: FrameScript<LED_COUNT>,
}

impl Thunder {
    pub fn new() -> Result<Self, ScriptError> {
        Ok(Self {
            flash: thunder_flash()?,
        })
    }
}

impl TickHook<LED_COUNT> for Thunder {
    fn after_tick(&mut self, layers: &mut Layers<LED_COUNT>) {
        // A new strike restarts a running one
        if layers.rng().u8(0..=10) != 1 {
            return;
        }
        log::debug!("[Thunder.after_tick] flash");
        if let Err(err) = layers.add_overwrite(self.flash.clone()) {
            log::warn!("[Thunder.after_tick] {err}");
        }
    }
}
