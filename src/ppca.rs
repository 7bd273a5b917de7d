//! Push/pop client attribute emulation.
//!
//! Vertex array and pixel store state are tracked here and restored by
//! replaying only what changed. Any other client attribute bits are handed
//! to the driver when it has a client attribute stack of its own.

#![allow(unsafe_code)]

use crate::{
    client_state::{PixelStore, VertexArray},
    context::{Context, Profile},
    driver::Driver,
    enums::*,
};
use gl::types::{GLbitfield, GLboolean, GLenum, GLint, GLuint};

// ----------------------------------------------------------------------------

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ppca {
    pub vertex_array: VertexArray,
    pub pixel_store: PixelStore,
    /// Chromium's ES2 driver rejects attribute pointers with no bound buffer.
    pub driver_allows_arrays_without_buffer: bool,
    mask_stack: Vec<GLbitfield>,
    vertex_array_stack: Vec<VertexArray>,
    pixel_store_stack: Vec<PixelStore>,
}

impl Default for Ppca {
    fn default() -> Self {
        Self {
            vertex_array: VertexArray::default(),
            pixel_store: PixelStore::default(),
            driver_allows_arrays_without_buffer: true,
            mask_stack: Vec::new(),
            vertex_array_stack: Vec::new(),
            pixel_store_stack: Vec::new(),
        }
    }
}

fn forwards_to_driver(profile: Profile, remaining: GLbitfield) -> bool {
    remaining != 0 && profile.has_client_attrib_stack()
}

impl Ppca {
    pub fn new<D: Driver>(ctx: &mut Context<D>) -> Self {
        let mut ppca = Self::default();
        ppca.reset(ctx);
        ppca
    }

    /// Restores the default state, empties the stacks and publishes the
    /// emulated limits.
    pub fn reset<D: Driver>(&mut self, ctx: &mut Context<D>) {
        self.vertex_array.reset();
        self.pixel_store.reset();
        self.mask_stack.clear();
        self.vertex_array_stack.clear();
        self.pixel_store_stack.clear();

        ctx.caps.max_vertex_attrib_bindings = MAX_BINDINGS as u32;
        ctx.caps.max_client_attrib_stack_depth = MAX_CLIENT_ATTRIB_DEPTH as u32;
        ctx.caps.max_vertex_attribs = MAX_ATTRIBS as u32;

        self.driver_allows_arrays_without_buffer =
            !(ctx.caps.profile == Profile::Es2 && ctx.caps.vendor == "Chromium");
    }

    pub fn depth(&self) -> usize {
        self.mask_stack.len()
    }

    pub fn push_client_attrib<D: Driver>(&mut self, ctx: &mut Context<D>, mask: GLbitfield) {
        if self.mask_stack.len() >= ctx.caps.max_client_attrib_stack_depth as usize {
            tracing::trace!("client attribute stack overflow");
            return;
        }
        self.mask_stack.push(mask);
        let mut remaining = mask;

        if remaining & CLIENT_VERTEX_ARRAY_BIT != 0 {
            tracing::debug!("pushing client vertex array state");
            self.vertex_array_stack.push(self.vertex_array.clone());
            remaining &= !CLIENT_VERTEX_ARRAY_BIT;
        }
        if remaining & CLIENT_PIXEL_STORE_BIT != 0 {
            tracing::debug!("pushing client pixel store state");
            self.pixel_store_stack.push(self.pixel_store.clone());
            remaining &= !CLIENT_PIXEL_STORE_BIT;
        }

        if forwards_to_driver(ctx.caps.profile, remaining) {
            unsafe { ctx.driver.PushClientAttrib(remaining) };
        }
    }

    pub fn pop_client_attrib<D: Driver>(&mut self, ctx: &mut Context<D>) {
        let mut remaining = match self.mask_stack.pop() {
            Some(mask) => mask,
            None => {
                tracing::trace!("client attribute stack underflow");
                return;
            }
        };

        if remaining & CLIENT_VERTEX_ARRAY_BIT != 0 {
            if let Some(saved) = self.vertex_array_stack.pop() {
                let allows = self.driver_allows_arrays_without_buffer;
                unsafe { self.vertex_array.transition(&mut ctx.driver, &saved, allows) };
                tracing::debug!("popped client vertex array state");
            }
            remaining &= !CLIENT_VERTEX_ARRAY_BIT;
        }
        if remaining & CLIENT_PIXEL_STORE_BIT != 0 {
            if let Some(saved) = self.pixel_store_stack.pop() {
                unsafe { self.pixel_store.transition(&mut ctx.driver, &saved) };
                tracing::debug!("popped client pixel store state");
            }
            remaining &= !CLIENT_PIXEL_STORE_BIT;
        }

        if forwards_to_driver(ctx.caps.profile, remaining) {
            unsafe { ctx.driver.PopClientAttrib() };
        }
    }

    /// `glClientAttribDefaultEXT`: resets the selected categories and applies
    /// them in full.
    pub fn client_attrib_default<D: Driver>(&mut self, ctx: &mut Context<D>, mask: GLbitfield) {
        let mut remaining = mask;

        if remaining & CLIENT_VERTEX_ARRAY_BIT != 0 {
            self.vertex_array.reset();
            unsafe {
                self.vertex_array
                    .set(&mut ctx.driver, self.driver_allows_arrays_without_buffer)
            };
            remaining &= !CLIENT_VERTEX_ARRAY_BIT;
        }
        if remaining & CLIENT_PIXEL_STORE_BIT != 0 {
            self.pixel_store.reset();
            unsafe { self.pixel_store.set(&mut ctx.driver) };
            remaining &= !CLIENT_PIXEL_STORE_BIT;
        }

        if forwards_to_driver(ctx.caps.profile, remaining) {
            unsafe { ctx.driver.ClientAttribDefaultEXT(remaining) };
        }
    }

    /// `glPushClientAttribDefaultEXT`.
    pub fn push_client_attrib_default<D: Driver>(
        &mut self,
        ctx: &mut Context<D>,
        mask: GLbitfield,
    ) {
        self.push_client_attrib(ctx, mask);
        self.client_attrib_default(ctx, mask);
    }

    pub fn bind_buffer(&mut self, target: GLenum, buffer: GLuint) {
        self.vertex_array.bind_buffer(target, buffer);
        self.pixel_store.bind_buffer(target, buffer);
    }

    pub fn delete_buffers(&mut self, buffers: &[GLuint]) {
        self.vertex_array.delete_buffers(buffers);
        self.pixel_store.delete_buffers(buffers);
    }

    pub fn delete_vertex_arrays(&mut self, arrays: &[GLuint]) {
        self.vertex_array.delete_vertex_arrays(arrays);
    }

    /// Integer queries answered by this layer. `None` for anything else.
    pub fn get<D: Driver>(&self, ctx: &Context<D>, pname: GLenum) -> Option<GLint> {
        Some(match pname {
            CLIENT_ATTRIB_STACK_DEPTH => self.mask_stack.len() as GLint,
            MAX_CLIENT_ATTRIB_STACK_DEPTH => ctx.caps.max_client_attrib_stack_depth as GLint,
            MAX_VERTEX_ATTRIB_BINDINGS => ctx.caps.max_vertex_attrib_bindings as GLint,
            MAX_VERTEX_ATTRIBS => ctx.caps.max_vertex_attribs as GLint,
            _ => return None,
        })
    }

    pub fn get_bool<D: Driver>(&self, ctx: &Context<D>, pname: GLenum) -> Option<GLboolean> {
        self.get(ctx, pname).map(|v| (v != 0) as GLboolean)
    }

    pub fn swap(&mut self, other: &mut Ppca) {
        std::mem::swap(self, other);
    }
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::Capabilities,
        format::ArrayKind,
        recording::{Call, RecordingDriver},
    };
    use std::os::raw::c_void;

    fn context(profile: Profile) -> Context<RecordingDriver> {
        Context::new(
            RecordingDriver::new(),
            Capabilities::default().with_profile(profile),
        )
    }

    #[test]
    fn reset_publishes_limits() {
        let mut ctx = context(Profile::Compatibility);
        ctx.caps.max_client_attrib_stack_depth = 2;
        let ppca = Ppca::new(&mut ctx);
        assert_eq!(ppca.get(&ctx, MAX_CLIENT_ATTRIB_STACK_DEPTH), Some(16));
        assert_eq!(ppca.get(&ctx, MAX_VERTEX_ATTRIBS), Some(16));
        assert_eq!(ppca.get(&ctx, MAX_VERTEX_ATTRIB_BINDINGS), Some(16));
        assert_eq!(ppca.get(&ctx, CLIENT_ATTRIB_STACK_DEPTH), Some(0));
        assert_eq!(ppca.get_bool(&ctx, CLIENT_ATTRIB_STACK_DEPTH), Some(0));
        assert_eq!(ppca.get(&ctx, ARRAY_BUFFER_BINDING), None);
        assert!(ppca.driver_allows_arrays_without_buffer);
    }

    #[test]
    fn chromium_es2_rejects_client_arrays() {
        let mut ctx = Context::new(
            RecordingDriver::new(),
            Capabilities::default()
                .with_profile(Profile::Es2)
                .with_vendor("Chromium"),
        );
        let ppca = Ppca::new(&mut ctx);
        assert!(!ppca.driver_allows_arrays_without_buffer);
    }

    #[test]
    fn push_pop_restores_state() {
        let mut ctx = context(Profile::Compatibility);
        let mut ppca = Ppca::new(&mut ctx);

        ppca.vertex_array.enable_client_state(VERTEX_ARRAY);
        ppca.pixel_store.pixel_store_i(UNPACK_ALIGNMENT, 1);
        let saved = ppca.clone();

        ppca.push_client_attrib(&mut ctx, CLIENT_ALL_ATTRIB_BITS);
        assert_eq!(ppca.depth(), 1);
        ppca.vertex_array.disable_client_state(VERTEX_ARRAY);
        ppca.vertex_array.bind_buffer(ARRAY_BUFFER, 3);
        ppca.pixel_store.pixel_store_i(UNPACK_ALIGNMENT, 8);
        ctx.driver.clear();

        ppca.pop_client_attrib(&mut ctx);
        assert_eq!(ppca, saved);
        assert_eq!(
            ctx.driver.take_calls(),
            vec![
                Call::EnableClientState { array: VERTEX_ARRAY },
                Call::BindBuffer { target: ARRAY_BUFFER, buffer: 0 },
                Call::PixelStorei { pname: UNPACK_ALIGNMENT, param: 1 },
                Call::PopClientAttrib,
            ]
        );
    }

    #[test]
    fn remaining_bits_are_forwarded() {
        let mut ctx = context(Profile::Compatibility);
        let mut ppca = Ppca::new(&mut ctx);

        ppca.push_client_attrib(&mut ctx, CLIENT_PIXEL_STORE_BIT);
        ppca.push_client_attrib(&mut ctx, CLIENT_VERTEX_ARRAY_BIT);
        ppca.push_client_attrib(&mut ctx, CLIENT_ALL_ATTRIB_BITS);
        assert_eq!(
            ctx.driver.take_calls(),
            vec![Call::PushClientAttrib {
                mask: !(CLIENT_PIXEL_STORE_BIT | CLIENT_VERTEX_ARRAY_BIT)
            }]
        );

        ppca.pop_client_attrib(&mut ctx);
        ppca.pop_client_attrib(&mut ctx);
        ppca.pop_client_attrib(&mut ctx);
        ppca.pop_client_attrib(&mut ctx);
        assert_eq!(ctx.driver.take_calls(), vec![Call::PopClientAttrib]);
        assert_eq!(ppca.depth(), 0);
    }

    #[test]
    fn core_and_es_never_forward() {
        for &profile in &[Profile::Core, Profile::Es1, Profile::Es2] {
            let mut ctx = context(profile);
            let mut ppca = Ppca::new(&mut ctx);
            ppca.push_client_attrib(&mut ctx, CLIENT_ALL_ATTRIB_BITS);
            ppca.client_attrib_default(&mut ctx, 0x10);
            ppca.pop_client_attrib(&mut ctx);
            assert!(ctx.driver.calls().is_empty());
        }
    }

    #[test]
    fn overflow_and_underflow_are_ignored() {
        let mut ctx = context(Profile::Core);
        let mut ppca = Ppca::new(&mut ctx);
        ppca.pop_client_attrib(&mut ctx);
        for _ in 0..MAX_CLIENT_ATTRIB_DEPTH + 3 {
            ppca.push_client_attrib(&mut ctx, CLIENT_VERTEX_ARRAY_BIT);
        }
        assert_eq!(ppca.depth(), MAX_CLIENT_ATTRIB_DEPTH);
        assert_eq!(
            ppca.get(&ctx, CLIENT_ATTRIB_STACK_DEPTH),
            Some(MAX_CLIENT_ATTRIB_DEPTH as GLint)
        );
    }

    #[test]
    fn default_resets_and_replays() {
        let mut ctx = context(Profile::Compatibility);
        let mut ppca = Ppca::new(&mut ctx);
        ppca.pixel_store.pixel_store_i(PACK_ALIGNMENT, 2);
        ppca.vertex_array.vertex_pointer(3, FLOAT, 0, 8 as *const c_void);

        ppca.push_client_attrib_default(&mut ctx, CLIENT_PIXEL_STORE_BIT | 0x100);
        assert_eq!(ppca.pixel_store, PixelStore::default());
        assert_eq!(ppca.vertex_array.named(ArrayKind::Vertex).pointer, 8);
        let calls = ctx.driver.take_calls();
        assert_eq!(calls.first(), Some(&Call::PushClientAttrib { mask: 0x100 }));
        assert_eq!(calls.last(), Some(&Call::ClientAttribDefaultEXT { mask: 0x100 }));
        assert!(calls.contains(&Call::PixelStorei { pname: PACK_ALIGNMENT, param: 4 }));

        ppca.pop_client_attrib(&mut ctx);
        assert_eq!(ppca.pixel_store.pack_alignment, 2);
    }

    #[test]
    fn buffer_bookkeeping_fans_out() {
        let mut ctx = context(Profile::Compatibility);
        let mut ppca = Ppca::new(&mut ctx);
        ppca.bind_buffer(ARRAY_BUFFER, 1);
        ppca.bind_buffer(PIXEL_PACK_BUFFER, 1);
        ppca.bind_buffer(ELEMENT_ARRAY_BUFFER, 2);
        ppca.vertex_array.bind_vertex_array(5);

        ppca.delete_buffers(&[1, 2]);
        ppca.delete_vertex_arrays(&[5]);
        assert_eq!(ppca.vertex_array.array_buffer_binding, 0);
        assert_eq!(ppca.vertex_array.element_array_buffer_binding, 0);
        assert_eq!(ppca.pixel_store.pixel_pack_buffer_binding, 0);
        assert_eq!(ppca.vertex_array.vertex_array_binding, 0);
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn push_pop_round_trip(
                mask in any::<u32>(),
                alignment in 1i32..9,
                buffer in 0u32..5,
                enable_vertex in any::<bool>(),
            ) {
                let mut ctx = context(Profile::Compatibility);
                let mut ppca = Ppca::new(&mut ctx);
                ppca.pixel_store.pixel_store_i(UNPACK_ALIGNMENT, 2);
                let before = ppca.clone();

                ppca.push_client_attrib(&mut ctx, mask);
                ppca.pixel_store.pixel_store_i(UNPACK_ALIGNMENT, alignment);
                ppca.bind_buffer(ARRAY_BUFFER, buffer);
                if enable_vertex {
                    ppca.vertex_array.enable_client_state(VERTEX_ARRAY);
                }
                ppca.pop_client_attrib(&mut ctx);

                if mask & CLIENT_VERTEX_ARRAY_BIT != 0 {
                    prop_assert_eq!(&ppca.vertex_array, &before.vertex_array);
                }
                if mask & CLIENT_PIXEL_STORE_BIT != 0 {
                    prop_assert_eq!(&ppca.pixel_store, &before.pixel_store);
                }
                prop_assert_eq!(ppca.depth(), 0);
            }
        }
    }
}
