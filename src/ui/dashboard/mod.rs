mod intent;
mod reducer;
mod state;

pub use intent::{DashboardIntent, DraftEdit};
pub use reducer::DashboardReducer;
pub use state::{
    CommentsState, ComposerField, ComposerState, DashboardState, FetchTicket, LoadState,
    PostDetail, Selection,
};
