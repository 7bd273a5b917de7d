//! The per-context data the emulation layer needs from its host.

use crate::{driver::Driver, enums::*};

/// Which flavour of GL the driver context implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Profile {
    Compatibility,
    Core,
    Es1,
    Es2,
}

impl Profile {
    /// Core and ES contexts have no client attribute stack of their own.
    pub fn has_client_attrib_stack(self) -> bool {
        self == Profile::Compatibility
    }
}

/// Driver capabilities, plus the limits the emulation advertises.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Capabilities {
    pub profile: Profile,
    pub vendor: String,
    pub arb_vertex_array_object: bool,
    pub max_vertex_attribs: u32,
    pub max_vertex_attrib_bindings: u32,
    pub max_client_attrib_stack_depth: u32,
}

impl Default for Capabilities {
    fn default() -> Self {
        Self {
            profile: Profile::Compatibility,
            vendor: String::new(),
            arb_vertex_array_object: false,
            max_vertex_attribs: MAX_ATTRIBS as u32,
            max_vertex_attrib_bindings: MAX_BINDINGS as u32,
            max_client_attrib_stack_depth: MAX_CLIENT_ATTRIB_DEPTH as u32,
        }
    }
}

impl Capabilities {
    pub fn with_profile(mut self, profile: Profile) -> Self {
        self.profile = profile;
        self
    }

    pub fn with_vendor(mut self, vendor: impl Into<String>) -> Self {
        self.vendor = vendor.into();
        self
    }

    pub fn with_max_vertex_attribs(mut self, max: u32) -> Self {
        self.max_vertex_attribs = max;
        self
    }
}

// ----------------------------------------------------------------------------

/// A driver together with what is known about it.
pub struct Context<D: Driver> {
    pub driver: D,
    pub caps: Capabilities,
    /// Nesting depth of `glBegin`/`glEnd`. Array state may not change inside.
    pub depth_begin_end: u32,
}

impl<D: Driver> Context<D> {
    pub fn new(driver: D, caps: Capabilities) -> Self {
        Self {
            driver,
            caps,
            depth_begin_end: 0,
        }
    }

    pub fn in_begin_end(&self) -> bool {
        self.depth_begin_end > 0
    }
}
