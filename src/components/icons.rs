//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuChevronRight as ChevronRight, LuDownload as Download, LuFile as File,
        LuFolder as Folder, LuHouse as Home, LuLayoutGrid as Grid, LuList as List,
        LuPackage as App, LuRefreshCw as Reload, LuSmartphone as Install, LuUpload as Upload,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsArrowClockwise as Reload, BsBoxSeam as App, BsChevronRight as ChevronRight,
        BsDownload as Download, BsFileEarmark as File, BsFolderFill as Folder, BsGrid as Grid,
        BsHouseFill as Home, BsListUl as List, BsPhone as Install, BsUpload as Upload,
        BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(APP, App);
themed_icon!(CHEVRON_RIGHT, ChevronRight);
themed_icon!(CLOSE, Close);
themed_icon!(DOWNLOAD, Download);
themed_icon!(FILE, File);
themed_icon!(FOLDER, Folder);
themed_icon!(GRID, Grid);
themed_icon!(HOME, Home);
themed_icon!(INSTALL, Install);
themed_icon!(LIST, List);
themed_icon!(RELOAD, Reload);
themed_icon!(UPLOAD, Upload);
