mod policy;

pub use policy::{authorize, can, AccessError, Action, Actor, Resource};
