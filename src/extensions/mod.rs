pub mod listeners;

pub use listeners::{
    FnListener, ListenerContext, SelectionListener, SliderCommand, SliderCommands, SliderEvent,
};
