//! Editor actions available in the current tool state.

use bitflags::bitflags;

bitflags! {
    /// Actions the host may enable in menus and toolbars
    #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Features: u16 {
        const SELECT        = 1 << 0;
        const CUT           = 1 << 1;
        const COPY          = 1 << 2;
        const PASTE         = 1 << 3;
        const REMOVE        = 1 << 4;
        const ROTATE        = 1 << 5;
        const MIRROR        = 1 << 6;
        const SNAP_TO_GRID  = 1 << 7;
        const PROPERTIES    = 1 << 8;
        const ABORT         = 1 << 9;
    }
}
