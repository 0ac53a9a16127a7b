//! Simulator pages: the watch face and the debug view.

mod debug;

pub use debug::draw_debug_page;

/// Page shown by the simulator.
#[derive(Clone, Copy, PartialEq, Eq, Default, Debug)]
pub enum Page {
    #[default]
    Face,
    Debug,
}

impl Page {
    pub const fn toggle(self) -> Self {
        match self {
            Self::Face => Self::Debug,
            Self::Debug => Self::Face,
        }
    }
}
