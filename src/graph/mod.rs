//! Archive graph core: classification, node and link derivation, layout and filtering.
//!
//! Nothing in here touches the window or the disk. The front end feeds artifacts in,
//! calls the command methods on [`GraphSession`] and draws the frames it hands back.

mod category;
mod filter;
mod interaction;
mod layout;
mod links;
mod node;
mod session;

pub use category::Category;
pub use filter::{FilterState, Persona};
pub use interaction::{HOVERED_NODE_RADIUS, NODE_RADIUS, Tooltip, ViewTransform, tooltip_for};
pub use layout::{LayoutMode, SimulationConfig, TimelineConfig, Viewport};
pub use session::GraphSession;
