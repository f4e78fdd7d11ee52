pub mod action;
pub mod command;
pub mod event;
pub mod host;

pub use action::{Action, Arg, ClickContext, SpawnCommand};
pub use command::{
    AutostartInfo, BindingInfo, Command, MonitorInfo, Response, StateInfo, WindowInfo,
};
pub use event::{BarInfo, EventFilter, StateEvent, SubscribeRequest};
pub use host::{HostEvent, ScreenGeometry, SizeHints, WindowAttributes};
