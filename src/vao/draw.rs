//! Draw calls against emulated objects.
//!
//! Before the driver sees a draw, every enabled attribute that reads client
//! memory has the vertices the draw touches copied into its shadow buffer.
//! The number of vertices comes from the draw arguments, from the indirect
//! commands, or from the largest index the draw reads. Client index arrays
//! and client indirect commands are moved into temporary buffers that are
//! deleted again before returning.
//!
//! All entry points return `Err` without issuing the draw when the data the
//! draw reads cannot be determined.

#![allow(unsafe_code)]

use super::{coverage::MultiCoverage, Array, Vao};
use crate::{
    context::Context,
    driver::Driver,
    enums::*,
    error::DrawError,
    format::{component_count, type_size},
};
use gl::types::{GLenum, GLint, GLintptr, GLsizei, GLsizeiptr, GLuint};
use std::{iter, mem, os::raw::c_void, ptr};

/// Counts and instance counts above this are treated as garbage.
const MAX_COUNT: u64 = 0x7FFF_FFFF;

/// `DrawArraysIndirectCommand`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawArraysCommand {
    pub count: GLuint,
    pub prim_count: GLuint,
    pub first: GLuint,
    pub base_instance: GLuint,
}

/// `DrawElementsIndirectCommand`.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DrawElementsCommand {
    pub count: GLuint,
    pub prim_count: GLuint,
    pub first_index: GLuint,
    pub base_vertex: GLint,
    pub base_instance: GLuint,
}

trait IndirectCommand: Copy {
    fn prim_count(&self) -> GLuint;
}

impl IndirectCommand for DrawArraysCommand {
    fn prim_count(&self) -> GLuint {
        self.prim_count
    }
}

impl IndirectCommand for DrawElementsCommand {
    fn prim_count(&self) -> GLuint {
        self.prim_count
    }
}

#[derive(Clone, Copy, Debug)]
enum DrawCount {
    Fixed(GLsizei),
    /// Byte offset into the bound parameter buffer.
    Parameter(GLintptr),
}

/// One sub-draw of an indexed draw. `indices` is a client address, or an
/// offset into the element buffer when one is bound.
#[derive(Clone, Copy, Debug)]
struct IndexRange {
    indices: usize,
    count: usize,
    base_vertex: GLint,
}

impl IndexRange {
    fn new(indices: *const c_void, count: GLsizei, base_vertex: GLint) -> Self {
        Self {
            indices: indices as usize,
            count: count.max(0) as usize,
            base_vertex,
        }
    }
}

// ----------------------------------------------------------------------------

unsafe fn get_integer<D: Driver>(d: &mut D, pname: GLenum) -> GLint {
    let mut value = 0;
    d.GetIntegerv(pname, &mut value);
    value
}

fn is_index_type(ty: GLenum) -> bool {
    matches!(ty, UNSIGNED_BYTE | UNSIGNED_SHORT | UNSIGNED_INT)
}

/// The index value that restarts primitives, if restart is on.
unsafe fn restart_index<D: Driver>(d: &mut D, ty: GLenum) -> Option<GLuint> {
    let fixed = d.IsEnabled(PRIMITIVE_RESTART_FIXED_INDEX) != 0;
    let restart = d.IsEnabled(PRIMITIVE_RESTART) != 0;
    if fixed {
        Some(match ty {
            UNSIGNED_BYTE => 0xFF,
            UNSIGNED_SHORT => 0xFFFF,
            _ => 0xFFFF_FFFF,
        })
    } else if restart {
        Some(get_integer(d, PRIMITIVE_RESTART_INDEX) as GLuint)
    } else {
        None
    }
}

/// Largest of `count` indices of type `ty`, skipping `restart`.
unsafe fn max_index(
    indices: *const u8,
    ty: GLenum,
    count: usize,
    restart: Option<GLuint>,
) -> Option<GLuint> {
    let mut max = None;
    for i in 0..count {
        let index = match ty {
            UNSIGNED_BYTE => *indices.add(i) as GLuint,
            UNSIGNED_SHORT => ptr::read_unaligned((indices as *const u16).add(i)) as GLuint,
            UNSIGNED_INT => ptr::read_unaligned((indices as *const u32).add(i)),
            _ => return None,
        };
        if Some(index) != restart {
            max = max.max(Some(index));
        }
    }
    max
}

/// Vertices read by non-indexed draws given as `(first, count)`.
fn arrays_extent<I: IntoIterator<Item = (u64, u64)>>(draws: I) -> u64 {
    draws
        .into_iter()
        .filter(|&(_, count)| count > 0 && count <= MAX_COUNT)
        .map(|(first, count)| first + count)
        .max()
        .unwrap_or(0)
}

unsafe fn resolve_draw_count<D: Driver>(
    d: &mut D,
    source: DrawCount,
    max_draw_count: GLsizei,
) -> Result<GLsizei, DrawError> {
    let count = match source {
        DrawCount::Fixed(count) => count,
        DrawCount::Parameter(offset) => {
            let mut count: GLsizei = 0;
            d.GetBufferSubData(
                PARAMETER_BUFFER,
                offset,
                mem::size_of::<GLsizei>() as GLsizeiptr,
                &mut count as *mut GLsizei as *mut c_void,
            );
            count
        }
    };
    let count = count.min(max_draw_count);
    if count <= 0 {
        return Err(DrawError::EmptyDrawCount(count));
    }
    Ok(count)
}

fn command_stride<C>(stride: GLsizei) -> usize {
    (stride.max(0) as usize).max(mem::size_of::<C>())
}

/// Bytes spanned by `count` commands `stride` apart.
fn command_bytes<C>(stride: GLsizei, count: usize) -> usize {
    command_stride::<C>(stride) * count.saturating_sub(1) + mem::size_of::<C>()
}

unsafe fn read_commands<C: Copy>(base: *const u8, step: usize, count: usize) -> Vec<C> {
    (0..count)
        .map(|i| ptr::read_unaligned(base.add(i * step) as *const C))
        .collect()
}

/// Reads `count` indirect commands from client memory, or from the bound
/// indirect buffer when `indirect_buffer` is not 0.
unsafe fn fetch_commands<C: IndirectCommand, D: Driver>(
    d: &mut D,
    indirect_buffer: GLuint,
    indirect: *const c_void,
    count: GLsizei,
    stride: GLsizei,
) -> Result<Vec<C>, DrawError> {
    let count = count as usize;
    let step = command_stride::<C>(stride);

    let commands = if indirect_buffer == 0 {
        if indirect.is_null() {
            return Err(DrawError::MissingIndirect);
        }
        read_commands::<C>(indirect as *const u8, step, count)
    } else {
        let mapped = d.MapBufferRange(
            DRAW_INDIRECT_BUFFER,
            indirect as GLintptr,
            command_bytes::<C>(stride, count) as GLsizeiptr,
            MAP_READ_BIT,
        );
        if mapped.is_null() {
            return Err(DrawError::MapFailed {
                target: DRAW_INDIRECT_BUFFER,
            });
        }
        let commands = read_commands::<C>(mapped as *const u8, step, count);
        d.UnmapBuffer(DRAW_INDIRECT_BUFFER);
        commands
    };

    for (draw, command) in commands.iter().enumerate() {
        let prim_count = command.prim_count();
        if prim_count == 0 || prim_count as u64 > MAX_COUNT {
            return Err(DrawError::InvalidInstanceCount { draw, prim_count });
        }
    }
    Ok(commands)
}

/// Creates a buffer holding `size` bytes of `data` and leaves it bound.
unsafe fn temp_buffer<D: Driver>(
    d: &mut D,
    target: GLenum,
    data: *const c_void,
    size: usize,
) -> Result<GLuint, DrawError> {
    let mut name = 0;
    d.GenBuffers(1, &mut name);
    if name == 0 {
        tracing::warn!("failed to allocate a temporary buffer for 0x{:X}", target);
        return Err(DrawError::BufferAllocation { target });
    }
    d.BindBuffer(target, name);
    d.BufferData(target, size as GLsizeiptr, data, STATIC_DRAW);
    Ok(name)
}

fn check_instances(instances: GLsizei) -> Result<(), DrawError> {
    if instances <= 0 {
        return Err(DrawError::InvalidPrimitiveCount(instances));
    }
    Ok(())
}

// ----------------------------------------------------------------------------

impl Vao {
    fn shadowed_arrays(&self) -> Vec<Array> {
        let object = self.current();
        (0..self.max_vertex_attribs)
            .filter(|&i| self.enables & (1 << i) != 0)
            .map(|i| object.arrays[i])
            .filter(Array::is_shadowed)
            .collect()
    }

    unsafe fn upload_shadows<D: Driver>(&self, d: &mut D, arrays: &[Array], vertices: u64) {
        let mut uploaded = false;
        for a in arrays {
            let size = (type_size(a.data_type) * component_count(a.size)) as u64 * vertices;
            if size == 0 {
                continue;
            }
            d.BindBuffer(ARRAY_BUFFER, a.shadow_buffer);
            d.BufferData(
                ARRAY_BUFFER,
                size as GLsizeiptr,
                a.shadow_pointer as *const c_void,
                DYNAMIC_DRAW,
            );
            uploaded = true;
        }
        if uploaded {
            d.BindBuffer(ARRAY_BUFFER, self.current().vertex_buffer);
        }
    }

    /// Refreshes the shadow buffers for a draw reading `vertices` vertices.
    /// The extent is only worked out when some attribute reads client memory.
    unsafe fn shadow_vertices<D, F>(&self, d: &mut D, vertices: F) -> Result<(), DrawError>
    where
        D: Driver,
        F: FnOnce(&mut D) -> Result<u64, DrawError>,
    {
        let arrays = self.shadowed_arrays();
        if arrays.is_empty() {
            return Ok(());
        }
        let vertices = vertices(d)?;
        if vertices == 0 {
            tracing::debug!("draw reads no vertices, dropping it");
            return Err(DrawError::EmptyVertexRange);
        }
        self.upload_shadows(d, &arrays, vertices);
        Ok(())
    }

    /// Vertices read by indexed sub-draws, restart indices excluded.
    unsafe fn elements_extent<D: Driver>(
        &self,
        d: &mut D,
        ty: GLenum,
        ranges: &[IndexRange],
    ) -> Result<u64, DrawError> {
        let index_size = type_size(ty);
        let restart = restart_index(d, ty);
        let ranges: Vec<IndexRange> = ranges
            .iter()
            .copied()
            .filter(|r| r.count > 0 && r.count as u64 <= MAX_COUNT)
            .collect();

        let extent_of = |r: &IndexRange, indices: *const u8| {
            max_index(indices, ty, r.count, restart)
                .map_or(0, |max| max as i64 + 1 + r.base_vertex as i64)
        };

        let mut extent = 0;
        if self.current().index_buffer == 0 {
            for r in &ranges {
                if r.indices == 0 {
                    return Err(DrawError::MissingClientPointer);
                }
                extent = extent.max(extent_of(r, r.indices as *const u8));
            }
        } else {
            let start = ranges.iter().map(|r| r.indices).min();
            let end = ranges.iter().map(|r| r.indices + r.count * index_size).max();
            if let (Some(start), Some(end)) = (start, end) {
                let mapped = d.MapBufferRange(
                    ELEMENT_ARRAY_BUFFER,
                    start as GLintptr,
                    (end - start) as GLsizeiptr,
                    MAP_READ_BIT,
                );
                if mapped.is_null() {
                    return Err(DrawError::MapFailed {
                        target: ELEMENT_ARRAY_BUFFER,
                    });
                }
                for r in &ranges {
                    let indices = (mapped as *const u8).add(r.indices - start);
                    extent = extent.max(extent_of(r, indices));
                }
                d.UnmapBuffer(ELEMENT_ARRAY_BUFFER);
            }
        }
        Ok(extent.max(0) as u64)
    }

    /// Shadows vertices and client indices of an indexed draw, then calls
    /// `issue` with the index pointer of every sub-draw.
    unsafe fn draw_indexed<D, F>(
        &self,
        ctx: &mut Context<D>,
        ty: GLenum,
        ranges: &[IndexRange],
        issue: F,
    ) -> Result<(), DrawError>
    where
        D: Driver,
        F: FnOnce(&mut D, &[*const c_void]),
    {
        let d = &mut ctx.driver;
        let original: Vec<*const c_void> =
            ranges.iter().map(|r| r.indices as *const c_void).collect();
        if !is_index_type(ty) {
            tracing::trace!("passing through draw with index type 0x{:X}", ty);
            issue(d, &original);
            return Ok(());
        }

        self.shadow_vertices(d, |d| self.elements_extent(d, ty, ranges))?;

        let index_buffer = self.current().index_buffer;
        if index_buffer != 0 {
            issue(d, &original);
            return Ok(());
        }

        if ranges.iter().any(|r| r.indices == 0) {
            return Err(DrawError::MissingClientPointer);
        }
        let index_size = type_size(ty);
        let spans: Vec<(usize, usize)> = ranges
            .iter()
            .map(|r| (r.indices, r.count * index_size))
            .collect();
        let coverage = MultiCoverage::new(&spans);
        if coverage.size() == 0 {
            return Err(DrawError::EmptyIndexCoverage);
        }

        let packed = coverage.gather();
        let temp = temp_buffer(
            d,
            ELEMENT_ARRAY_BUFFER,
            packed.as_ptr() as *const c_void,
            packed.len(),
        )?;
        let offsets: Vec<*const c_void> = coverage
            .offsets()
            .iter()
            .map(|&offset| offset as *const c_void)
            .collect();
        issue(d, &offsets);

        d.BindBuffer(ELEMENT_ARRAY_BUFFER, index_buffer);
        d.DeleteBuffers(1, &temp);
        Ok(())
    }

    /// Shadows vertices of an indirect draw and moves client commands into a
    /// temporary indirect buffer, then calls `issue` with the command
    /// pointer to hand to the driver.
    #[allow(clippy::too_many_arguments)]
    unsafe fn draw_indirect<C, D, E, F>(
        &self,
        ctx: &mut Context<D>,
        indirect: *const c_void,
        count: DrawCount,
        max_draw_count: GLsizei,
        stride: GLsizei,
        extent: E,
        issue: F,
    ) -> Result<(), DrawError>
    where
        C: IndirectCommand,
        D: Driver,
        E: FnOnce(&mut D, &[C]) -> Result<u64, DrawError>,
        F: FnOnce(&mut D, *const c_void),
    {
        let d = &mut ctx.driver;
        let indirect_buffer = get_integer(d, DRAW_INDIRECT_BUFFER_BINDING) as GLuint;
        let mut resolved = None;

        let arrays = self.shadowed_arrays();
        if !arrays.is_empty() {
            let n = resolve_draw_count(d, count, max_draw_count)?;
            let commands = fetch_commands::<C, D>(d, indirect_buffer, indirect, n, stride)?;
            let vertices = extent(d, &commands)?;
            if vertices == 0 {
                tracing::debug!("indirect draw reads no vertices, dropping it");
                return Err(DrawError::EmptyVertexRange);
            }
            self.upload_shadows(d, &arrays, vertices);
            resolved = Some(n);
        }

        if indirect_buffer != 0 {
            issue(d, indirect);
            return Ok(());
        }

        if indirect.is_null() {
            return Err(DrawError::MissingIndirect);
        }
        let n = match resolved {
            Some(n) => n,
            None => resolve_draw_count(d, count, max_draw_count)?,
        };
        let temp = temp_buffer(
            d,
            DRAW_INDIRECT_BUFFER,
            indirect,
            command_bytes::<C>(stride, n as usize),
        )?;
        issue(d, ptr::null());

        d.BindBuffer(DRAW_INDIRECT_BUFFER, 0);
        d.DeleteBuffers(1, &temp);
        Ok(())
    }

    unsafe fn indirect_elements_extent<D: Driver>(
        &self,
        d: &mut D,
        ty: GLenum,
        commands: &[DrawElementsCommand],
    ) -> Result<u64, DrawError> {
        if self.current().index_buffer == 0 {
            return Err(DrawError::MissingClientPointer);
        }
        let index_size = type_size(ty);
        let ranges: Vec<IndexRange> = commands
            .iter()
            .filter(|c| c.count as u64 <= MAX_COUNT)
            .map(|c| IndexRange {
                indices: c.first_index as usize * index_size,
                count: c.count as usize,
                base_vertex: c.base_vertex,
            })
            .collect();
        self.elements_extent(d, ty, &ranges)
    }

    // ------------------------------------------------------------------------
    // Arrays

    /// `glDrawArrays`.
    ///
    /// # Safety
    ///
    /// Client memory attribute pointers of the bound object must be readable
    /// for every vertex the draw references.
    pub unsafe fn draw_arrays<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        first: GLint,
        count: GLsizei,
    ) -> Result<(), DrawError> {
        let d = &mut ctx.driver;
        self.shadow_vertices(d, |_| {
            Ok(arrays_extent(iter::once((first.max(0) as u64, count.max(0) as u64))))
        })?;
        d.DrawArrays(mode, first, count);
        Ok(())
    }

    /// `glDrawArraysInstanced`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_arrays`].
    pub unsafe fn draw_arrays_instanced<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instances: GLsizei,
    ) -> Result<(), DrawError> {
        check_instances(instances)?;
        let d = &mut ctx.driver;
        self.shadow_vertices(d, |_| {
            Ok(arrays_extent(iter::once((first.max(0) as u64, count.max(0) as u64))))
        })?;
        d.DrawArraysInstanced(mode, first, count, instances);
        Ok(())
    }

    /// `glDrawArraysInstancedBaseInstance`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_arrays`].
    pub unsafe fn draw_arrays_instanced_base_instance<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        first: GLint,
        count: GLsizei,
        instances: GLsizei,
        base_instance: GLuint,
    ) -> Result<(), DrawError> {
        check_instances(instances)?;
        let d = &mut ctx.driver;
        self.shadow_vertices(d, |_| {
            Ok(arrays_extent(iter::once((first.max(0) as u64, count.max(0) as u64))))
        })?;
        d.DrawArraysInstancedBaseInstance(mode, first, count, instances, base_instance);
        Ok(())
    }

    /// `glMultiDrawArrays`, one sub-draw per pair of `first` and `count`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_arrays`].
    pub unsafe fn multi_draw_arrays<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        first: &[GLint],
        count: &[GLsizei],
    ) -> Result<(), DrawError> {
        let n = first.len().min(count.len());
        let d = &mut ctx.driver;
        self.shadow_vertices(d, |_| {
            Ok(arrays_extent(
                first
                    .iter()
                    .zip(count)
                    .map(|(&f, &c)| (f.max(0) as u64, c.max(0) as u64)),
            ))
        })?;
        d.MultiDrawArrays(mode, first.as_ptr(), count.as_ptr(), n as GLsizei);
        Ok(())
    }

    // ------------------------------------------------------------------------
    // Elements

    /// `glDrawElements`.
    ///
    /// # Safety
    ///
    /// With no element buffer bound, `indices` must point at `count` indices
    /// of type `ty`. Client memory attribute pointers must be readable for
    /// every vertex those indices reference.
    pub unsafe fn draw_elements<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        count: GLsizei,
        ty: GLenum,
        indices: *const c_void,
    ) -> Result<(), DrawError> {
        let ranges = [IndexRange::new(indices, count, 0)];
        self.draw_indexed(ctx, ty, &ranges, |d, p| d.DrawElements(mode, count, ty, p[0]))
    }

    /// `glDrawElementsInstanced`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_elements`].
    pub unsafe fn draw_elements_instanced<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        count: GLsizei,
        ty: GLenum,
        indices: *const c_void,
        instances: GLsizei,
    ) -> Result<(), DrawError> {
        check_instances(instances)?;
        let ranges = [IndexRange::new(indices, count, 0)];
        self.draw_indexed(ctx, ty, &ranges, |d, p| {
            d.DrawElementsInstanced(mode, count, ty, p[0], instances)
        })
    }

    /// `glDrawElementsInstancedBaseInstance`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_elements`].
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn draw_elements_instanced_base_instance<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        count: GLsizei,
        ty: GLenum,
        indices: *const c_void,
        instances: GLsizei,
        base_instance: GLuint,
    ) -> Result<(), DrawError> {
        check_instances(instances)?;
        let ranges = [IndexRange::new(indices, count, 0)];
        self.draw_indexed(ctx, ty, &ranges, |d, p| {
            d.DrawElementsInstancedBaseInstance(mode, count, ty, p[0], instances, base_instance)
        })
    }

    /// `glDrawElementsBaseVertex`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_elements`].
    pub unsafe fn draw_elements_base_vertex<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        count: GLsizei,
        ty: GLenum,
        indices: *const c_void,
        base_vertex: GLint,
    ) -> Result<(), DrawError> {
        let ranges = [IndexRange::new(indices, count, base_vertex)];
        self.draw_indexed(ctx, ty, &ranges, |d, p| {
            d.DrawElementsBaseVertex(mode, count, ty, p[0], base_vertex)
        })
    }

    /// `glDrawElementsInstancedBaseVertex`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_elements`].
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn draw_elements_instanced_base_vertex<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        count: GLsizei,
        ty: GLenum,
        indices: *const c_void,
        instances: GLsizei,
        base_vertex: GLint,
    ) -> Result<(), DrawError> {
        check_instances(instances)?;
        let ranges = [IndexRange::new(indices, count, base_vertex)];
        self.draw_indexed(ctx, ty, &ranges, |d, p| {
            d.DrawElementsInstancedBaseVertex(mode, count, ty, p[0], instances, base_vertex)
        })
    }

    /// `glDrawElementsInstancedBaseVertexBaseInstance`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_elements`].
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn draw_elements_instanced_base_vertex_base_instance<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        count: GLsizei,
        ty: GLenum,
        indices: *const c_void,
        instances: GLsizei,
        base_vertex: GLint,
        base_instance: GLuint,
    ) -> Result<(), DrawError> {
        check_instances(instances)?;
        let ranges = [IndexRange::new(indices, count, base_vertex)];
        self.draw_indexed(ctx, ty, &ranges, |d, p| {
            d.DrawElementsInstancedBaseVertexBaseInstance(
                mode,
                count,
                ty,
                p[0],
                instances,
                base_vertex,
                base_instance,
            )
        })
    }

    /// `glDrawRangeElements`. The extent is taken from the indices, not from
    /// `start` and `end`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_elements`].
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn draw_range_elements<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        ty: GLenum,
        indices: *const c_void,
    ) -> Result<(), DrawError> {
        let ranges = [IndexRange::new(indices, count, 0)];
        self.draw_indexed(ctx, ty, &ranges, |d, p| {
            d.DrawRangeElements(mode, start, end, count, ty, p[0])
        })
    }

    /// `glDrawRangeElementsBaseVertex`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_elements`].
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn draw_range_elements_base_vertex<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        start: GLuint,
        end: GLuint,
        count: GLsizei,
        ty: GLenum,
        indices: *const c_void,
        base_vertex: GLint,
    ) -> Result<(), DrawError> {
        let ranges = [IndexRange::new(indices, count, base_vertex)];
        self.draw_indexed(ctx, ty, &ranges, |d, p| {
            d.DrawRangeElementsBaseVertex(mode, start, end, count, ty, p[0], base_vertex)
        })
    }

    /// `glMultiDrawElements`. Client index arrays of all sub-draws are packed
    /// into one temporary element buffer.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_elements`], for every sub-draw.
    pub unsafe fn multi_draw_elements<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        count: &[GLsizei],
        ty: GLenum,
        indices: &[*const c_void],
    ) -> Result<(), DrawError> {
        let ranges: Vec<IndexRange> = count
            .iter()
            .zip(indices)
            .map(|(&c, &i)| IndexRange::new(i, c, 0))
            .collect();
        let n = ranges.len() as GLsizei;
        self.draw_indexed(ctx, ty, &ranges, |d, p| {
            d.MultiDrawElements(mode, count.as_ptr(), ty, p.as_ptr(), n)
        })
    }

    /// `glMultiDrawElementsBaseVertex`.
    ///
    /// # Safety
    ///
    /// See [`Vao::draw_elements`], for every sub-draw.
    pub unsafe fn multi_draw_elements_base_vertex<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        count: &[GLsizei],
        ty: GLenum,
        indices: &[*const c_void],
        base_vertex: &[GLint],
    ) -> Result<(), DrawError> {
        let ranges: Vec<IndexRange> = count
            .iter()
            .zip(indices)
            .zip(base_vertex)
            .map(|((&c, &i), &b)| IndexRange::new(i, c, b))
            .collect();
        let n = ranges.len() as GLsizei;
        self.draw_indexed(ctx, ty, &ranges, |d, p| {
            d.MultiDrawElementsBaseVertex(
                mode,
                count.as_ptr(),
                ty,
                p.as_ptr(),
                n,
                base_vertex.as_ptr(),
            )
        })
    }

    // ------------------------------------------------------------------------
    // Indirect

    /// `glDrawArraysIndirect`. `indirect` is an offset into the bound
    /// indirect buffer, or a client address when none is bound.
    ///
    /// # Safety
    ///
    /// A client `indirect` must point at one [`DrawArraysCommand`]. Client
    /// memory attribute pointers must be readable for every vertex the
    /// command references.
    pub unsafe fn draw_arrays_indirect<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        indirect: *const c_void,
    ) -> Result<(), DrawError> {
        self.draw_indirect(
            ctx,
            indirect,
            DrawCount::Fixed(1),
            1,
            0,
            |_, commands: &[DrawArraysCommand]| {
                Ok(arrays_extent(
                    commands.iter().map(|c| (c.first as u64, c.count as u64)),
                ))
            },
            |d, indirect| d.DrawArraysIndirect(mode, indirect),
        )
    }

    /// `glDrawElementsIndirect`.
    ///
    /// # Safety
    ///
    /// A client `indirect` must point at one [`DrawElementsCommand`].
    pub unsafe fn draw_elements_indirect<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        ty: GLenum,
        indirect: *const c_void,
    ) -> Result<(), DrawError> {
        if !is_index_type(ty) {
            ctx.driver.DrawElementsIndirect(mode, ty, indirect);
            return Ok(());
        }
        self.draw_indirect(
            ctx,
            indirect,
            DrawCount::Fixed(1),
            1,
            0,
            |d, commands: &[DrawElementsCommand]| self.indirect_elements_extent(d, ty, commands),
            |d, indirect| d.DrawElementsIndirect(mode, ty, indirect),
        )
    }

    /// `glMultiDrawArraysIndirect`.
    ///
    /// # Safety
    ///
    /// A client `indirect` must point at `draw_count` commands `stride`
    /// bytes apart.
    pub unsafe fn multi_draw_arrays_indirect<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        indirect: *const c_void,
        draw_count: GLsizei,
        stride: GLsizei,
    ) -> Result<(), DrawError> {
        self.draw_indirect(
            ctx,
            indirect,
            DrawCount::Fixed(draw_count),
            draw_count,
            stride,
            |_, commands: &[DrawArraysCommand]| {
                Ok(arrays_extent(
                    commands.iter().map(|c| (c.first as u64, c.count as u64)),
                ))
            },
            |d, indirect| d.MultiDrawArraysIndirect(mode, indirect, draw_count, stride),
        )
    }

    /// `glMultiDrawElementsIndirect`.
    ///
    /// # Safety
    ///
    /// See [`Vao::multi_draw_arrays_indirect`].
    pub unsafe fn multi_draw_elements_indirect<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        ty: GLenum,
        indirect: *const c_void,
        draw_count: GLsizei,
        stride: GLsizei,
    ) -> Result<(), DrawError> {
        if !is_index_type(ty) {
            ctx.driver.MultiDrawElementsIndirect(mode, ty, indirect, draw_count, stride);
            return Ok(());
        }
        self.draw_indirect(
            ctx,
            indirect,
            DrawCount::Fixed(draw_count),
            draw_count,
            stride,
            |d, commands: &[DrawElementsCommand]| self.indirect_elements_extent(d, ty, commands),
            |d, indirect| d.MultiDrawElementsIndirect(mode, ty, indirect, draw_count, stride),
        )
    }

    /// `glMultiDrawArraysIndirectCount`. `draw_count` is an offset into the
    /// bound parameter buffer, or the address of the count when none is
    /// bound. Without a parameter buffer the draw becomes a
    /// `glMultiDrawArraysIndirect` of `min(*draw_count, max_draw_count)`.
    ///
    /// # Safety
    ///
    /// See [`Vao::multi_draw_arrays_indirect`]. A client `draw_count` must
    /// point at a readable `GLsizei`.
    pub unsafe fn multi_draw_arrays_indirect_count<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        indirect: *const c_void,
        draw_count: GLintptr,
        max_draw_count: GLsizei,
        stride: GLsizei,
    ) -> Result<(), DrawError> {
        if get_integer(&mut ctx.driver, PARAMETER_BUFFER_BINDING) == 0 {
            let n = client_draw_count(draw_count, max_draw_count)?;
            return self.multi_draw_arrays_indirect(ctx, mode, indirect, n, stride);
        }
        self.draw_indirect(
            ctx,
            indirect,
            DrawCount::Parameter(draw_count),
            max_draw_count,
            stride,
            |_, commands: &[DrawArraysCommand]| {
                Ok(arrays_extent(
                    commands.iter().map(|c| (c.first as u64, c.count as u64)),
                ))
            },
            |d, indirect| {
                d.MultiDrawArraysIndirectCount(mode, indirect, draw_count, max_draw_count, stride)
            },
        )
    }

    /// `glMultiDrawElementsIndirectCount`.
    ///
    /// # Safety
    ///
    /// See [`Vao::multi_draw_arrays_indirect_count`].
    #[allow(clippy::too_many_arguments)]
    pub unsafe fn multi_draw_elements_indirect_count<D: Driver>(
        &self,
        ctx: &mut Context<D>,
        mode: GLenum,
        ty: GLenum,
        indirect: *const c_void,
        draw_count: GLintptr,
        max_draw_count: GLsizei,
        stride: GLsizei,
    ) -> Result<(), DrawError> {
        if get_integer(&mut ctx.driver, PARAMETER_BUFFER_BINDING) == 0 {
            let n = client_draw_count(draw_count, max_draw_count)?;
            return self.multi_draw_elements_indirect(ctx, mode, ty, indirect, n, stride);
        }
        if !is_index_type(ty) {
            ctx.driver.MultiDrawElementsIndirectCount(
                mode,
                ty,
                indirect,
                draw_count,
                max_draw_count,
                stride,
            );
            return Ok(());
        }
        self.draw_indirect(
            ctx,
            indirect,
            DrawCount::Parameter(draw_count),
            max_draw_count,
            stride,
            |d, commands: &[DrawElementsCommand]| self.indirect_elements_extent(d, ty, commands),
            |d, indirect| {
                d.MultiDrawElementsIndirectCount(
                    mode,
                    ty,
                    indirect,
                    draw_count,
                    max_draw_count,
                    stride,
                )
            },
        )
    }
}

/// Reads a draw count from client memory, clamped to `max_draw_count`.
unsafe fn client_draw_count(
    draw_count: GLintptr,
    max_draw_count: GLsizei,
) -> Result<GLsizei, DrawError> {
    let count = draw_count as *const GLsizei;
    if count.is_null() {
        return Err(DrawError::MissingDrawCount);
    }
    let n = ptr::read_unaligned(count).min(max_draw_count);
    if n <= 0 {
        return Err(DrawError::EmptyDrawCount(n));
    }
    Ok(n)
}

// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        context::{Capabilities, Profile},
        recording::{Call, RecordingDriver},
    };

    fn setup() -> (Context<RecordingDriver>, Vao) {
        let mut ctx = Context::new(
            RecordingDriver::new(),
            Capabilities::default().with_profile(Profile::Core),
        );
        let vao = Vao::new(&mut ctx, None);
        ctx.driver.clear();
        (ctx, vao)
    }

    fn as_bytes<T: Copy>(values: &[T]) -> Vec<u8> {
        let len = values.len() * mem::size_of::<T>();
        unsafe { std::slice::from_raw_parts(values.as_ptr() as *const u8, len).to_vec() }
    }

    /// Points attribute `index` at client memory and enables it.
    fn client_attrib(
        ctx: &mut Context<RecordingDriver>,
        vao: &mut Vao,
        index: GLuint,
        size: GLint,
        data: &[f32],
    ) {
        vao.attrib_pointer(ctx, index, size, FLOAT, false, 0, data.as_ptr() as *const c_void);
        vao.enable_vertex_attrib_array(ctx, index);
        ctx.driver.clear();
    }

    fn uploads(calls: &[Call], target: GLenum) -> Vec<usize> {
        calls
            .iter()
            .filter_map(|c| match c {
                Call::BufferData { target: t, data, .. } if *t == target => Some(data.len()),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn client_attribute_is_shadowed_once_per_draw() {
        let (mut ctx, mut vao) = setup();
        let positions = [0f32; 3 * 10];
        client_attrib(&mut ctx, &mut vao, 0, 3, &positions);
        let shadow = vao.current().arrays[0].shadow_buffer;

        unsafe { vao.draw_arrays(&mut ctx, TRIANGLES, 2, 6) }.unwrap();
        let calls = ctx.driver.take_calls();
        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![12 * 8]);
        assert_eq!(calls[0], Call::BindBuffer { target: ARRAY_BUFFER, buffer: shadow });
        assert_eq!(
            &calls[2..],
            &[
                Call::BindBuffer { target: ARRAY_BUFFER, buffer: 0 },
                Call::DrawArrays { mode: TRIANGLES, first: 2, count: 6 },
            ]
        );
        assert_eq!(ctx.driver.buffer_contents(shadow).map(<[u8]>::len), Some(96));
    }

    #[test]
    fn upload_size_ignores_the_stride() {
        let (mut ctx, mut vao) = setup();
        let interleaved = [0f32; 5 * 4];
        vao.attrib_pointer(&mut ctx, 1, 2, FLOAT, false, 20, interleaved.as_ptr() as *const c_void);
        vao.enable_vertex_attrib_array(&mut ctx, 1);
        ctx.driver.clear();

        unsafe { vao.draw_arrays(&mut ctx, TRIANGLES, 0, 4) }.unwrap();
        assert_eq!(uploads(ctx.driver.calls(), ARRAY_BUFFER), vec![4 * 2 * 4]);
    }

    #[test]
    fn bgra_counts_four_components() {
        let (mut ctx, mut vao) = setup();
        let colors = [0u8; 4 * 3];
        vao.attrib_pointer(
            &mut ctx,
            3,
            BGRA as GLint,
            UNSIGNED_BYTE,
            true,
            0,
            colors.as_ptr() as *const c_void,
        );
        vao.enable_vertex_attrib_array(&mut ctx, 3);
        ctx.driver.clear();

        unsafe { vao.draw_arrays(&mut ctx, TRIANGLES, 0, 3) }.unwrap();
        assert_eq!(uploads(ctx.driver.calls(), ARRAY_BUFFER), vec![4 * 3]);
    }

    #[test]
    fn buffer_sourced_attribute_passes_through() {
        let (mut ctx, mut vao) = setup();
        vao.shadow_buffer_binding(ARRAY_BUFFER, 40);
        vao.attrib_pointer(&mut ctx, 0, 3, FLOAT, false, 0, 16 as *const c_void);
        vao.enable_vertex_attrib_array(&mut ctx, 0);
        ctx.driver.clear();

        unsafe { vao.draw_arrays_instanced(&mut ctx, TRIANGLES, 0, 3, 2) }.unwrap();
        assert_eq!(
            ctx.driver.take_calls(),
            vec![Call::DrawArraysInstanced {
                mode: TRIANGLES,
                first: 0,
                count: 3,
                instances: 2
            }]
        );

        assert_eq!(
            unsafe { vao.draw_arrays_instanced(&mut ctx, TRIANGLES, 0, 3, 0) },
            Err(DrawError::InvalidPrimitiveCount(0))
        );
        assert!(ctx.driver.calls().is_empty());
    }

    #[test]
    fn disabled_client_attribute_is_not_uploaded() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 8];
        client_attrib(&mut ctx, &mut vao, 0, 4, &data);
        vao.disable_vertex_attrib_array(&mut ctx, 0);
        ctx.driver.clear();

        unsafe { vao.draw_arrays(&mut ctx, TRIANGLES, 0, 2) }.unwrap();
        assert_eq!(ctx.driver.calls().len(), 1);
    }

    #[test]
    fn multi_draw_arrays_covers_every_sub_draw() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 2 * 20];
        client_attrib(&mut ctx, &mut vao, 0, 2, &data);

        unsafe { vao.multi_draw_arrays(&mut ctx, TRIANGLES, &[0, 10, 4], &[3, 6, 3]) }.unwrap();
        let calls = ctx.driver.take_calls();
        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![16 * 8]);
        assert_eq!(
            calls.last(),
            Some(&Call::MultiDrawArrays {
                mode: TRIANGLES,
                first: vec![0, 10, 4],
                count: vec![3, 6, 3]
            })
        );
    }

    #[test]
    fn client_indices_go_through_a_temporary_buffer() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 4 * 8];
        client_attrib(&mut ctx, &mut vao, 0, 4, &data);
        let indices: [u16; 6] = [0, 1, 2, 2, 1, 5];

        unsafe {
            vao.draw_elements(
                &mut ctx,
                TRIANGLES,
                6,
                UNSIGNED_SHORT,
                indices.as_ptr() as *const c_void,
            )
        }
        .unwrap();
        let calls = ctx.driver.take_calls();

        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![16 * 6]);
        let temp = calls.iter().rev().find_map(|c| match c {
            Call::DeleteBuffers { names } => Some(names.clone()),
            _ => None,
        });
        let temp = temp.unwrap_or_default();
        assert_eq!(temp.len(), 1);
        assert!(calls.contains(&Call::BufferData {
            target: ELEMENT_ARRAY_BUFFER,
            data: as_bytes(&indices),
            usage: STATIC_DRAW,
        }));
        assert!(calls.contains(&Call::DrawElements {
            mode: TRIANGLES,
            count: 6,
            type_: UNSIGNED_SHORT,
            indices: 0
        }));
        assert!(!ctx.driver.is_buffer(temp[0]));
        assert_eq!(ctx.driver.bound(ELEMENT_ARRAY_BUFFER), 0);
    }

    #[test]
    fn restart_index_is_excluded_when_enabled() {
        let (mut ctx, mut vao) = setup();
        let data = vec![0f32; 4 * 256];
        client_attrib(&mut ctx, &mut vao, 0, 4, &data);
        let indices: [u8; 4] = [0, 3, 0xFF, 1];
        let ptr = indices.as_ptr() as *const c_void;

        ctx.driver.preset_enabled(PRIMITIVE_RESTART_FIXED_INDEX, true);
        unsafe { vao.draw_elements(&mut ctx, TRIANGLE_STRIP, 4, UNSIGNED_BYTE, ptr) }.unwrap();
        assert_eq!(uploads(&ctx.driver.take_calls(), ARRAY_BUFFER), vec![16 * 4]);

        ctx.driver.preset_enabled(PRIMITIVE_RESTART_FIXED_INDEX, false);
        ctx.driver.preset_enabled(PRIMITIVE_RESTART, true);
        ctx.driver.preset_restart_index(3);
        unsafe { vao.draw_elements(&mut ctx, TRIANGLE_STRIP, 4, UNSIGNED_BYTE, ptr) }.unwrap();
        assert_eq!(uploads(&ctx.driver.take_calls(), ARRAY_BUFFER), vec![16 * 256]);

        ctx.driver.preset_enabled(PRIMITIVE_RESTART, false);
        unsafe { vao.draw_elements(&mut ctx, TRIANGLE_STRIP, 4, UNSIGNED_BYTE, ptr) }.unwrap();
        assert_eq!(uploads(&ctx.driver.take_calls(), ARRAY_BUFFER), vec![16 * 256]);
    }

    #[test]
    fn bound_element_buffer_is_mapped_for_the_extent() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 2 * 16];
        client_attrib(&mut ctx, &mut vao, 0, 2, &data);
        let indices: [u32; 6] = [9, 9, 9, 0, 1, 4];
        ctx.driver.preload_buffer(ELEMENT_ARRAY_BUFFER, 30, &as_bytes(&indices));
        vao.shadow_buffer_binding(ELEMENT_ARRAY_BUFFER, 30);

        // Only the last three indices are read, offset by a base vertex.
        unsafe {
            vao.draw_elements_base_vertex(
                &mut ctx,
                TRIANGLES,
                3,
                UNSIGNED_INT,
                12 as *const c_void,
                2,
            )
        }
        .unwrap();
        let calls = ctx.driver.take_calls();
        assert_eq!(
            calls[0],
            Call::MapBufferRange { target: ELEMENT_ARRAY_BUFFER, offset: 12, length: 12 }
        );
        assert_eq!(calls[1], Call::UnmapBuffer { target: ELEMENT_ARRAY_BUFFER });
        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![8 * 7]);
        assert_eq!(
            calls.last(),
            Some(&Call::DrawElementsBaseVertex {
                mode: TRIANGLES,
                count: 3,
                type_: UNSIGNED_INT,
                indices: 12,
                base_vertex: 2
            })
        );

        ctx.driver.fail_map = true;
        let result = unsafe {
            vao.draw_elements(&mut ctx, TRIANGLES, 3, UNSIGNED_INT, std::ptr::null())
        };
        assert_eq!(result, Err(DrawError::MapFailed { target: ELEMENT_ARRAY_BUFFER }));
        assert!(ctx.driver.draws().is_empty());
    }

    #[test]
    fn multi_draw_elements_packs_overlapping_index_arrays() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 4 * 8];
        client_attrib(&mut ctx, &mut vao, 0, 4, &data);
        let indices: [u16; 8] = [0, 1, 2, 3, 4, 5, 6, 7];
        let base = indices.as_ptr();
        let pointers = unsafe {
            [base.add(4) as *const c_void, base as *const c_void, base.add(2) as *const c_void]
        };

        unsafe {
            vao.multi_draw_elements(&mut ctx, TRIANGLES, &[3, 3, 3], UNSIGNED_SHORT, &pointers)
        }
        .unwrap();
        let calls = ctx.driver.take_calls();

        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![16 * 7]);
        assert_eq!(uploads(&calls, ELEMENT_ARRAY_BUFFER), vec![14]);
        assert!(calls.contains(&Call::MultiDrawElements {
            mode: TRIANGLES,
            count: vec![3, 3, 3],
            type_: UNSIGNED_SHORT,
            indices: vec![8, 0, 4],
        }));
    }

    #[test]
    fn missing_client_indices_abort() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 4];
        client_attrib(&mut ctx, &mut vao, 0, 4, &data);
        let result = unsafe {
            vao.draw_elements(&mut ctx, TRIANGLES, 3, UNSIGNED_SHORT, std::ptr::null())
        };
        assert_eq!(result, Err(DrawError::MissingClientPointer));
        assert!(ctx.driver.calls().is_empty());
    }

    #[test]
    fn client_indirect_commands_use_a_temporary_buffer() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 3 * 12];
        client_attrib(&mut ctx, &mut vao, 0, 3, &data);
        let commands = [
            DrawArraysCommand { count: 3, prim_count: 1, first: 0, base_instance: 0 },
            DrawArraysCommand { count: 4, prim_count: 2, first: 6, base_instance: 0 },
        ];

        unsafe {
            vao.multi_draw_arrays_indirect(
                &mut ctx,
                TRIANGLES,
                commands.as_ptr() as *const c_void,
                2,
                0,
            )
        }
        .unwrap();
        let calls = ctx.driver.take_calls();

        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![12 * 10]);
        assert_eq!(uploads(&calls, DRAW_INDIRECT_BUFFER), vec![32]);
        let n = calls.len();
        assert_eq!(
            calls[n - 3],
            Call::MultiDrawArraysIndirect { mode: TRIANGLES, indirect: 0, draw_count: 2, stride: 0 }
        );
        assert_eq!(calls[n - 2], Call::BindBuffer { target: DRAW_INDIRECT_BUFFER, buffer: 0 });
        assert!(matches!(calls[n - 1], Call::DeleteBuffers { .. }));
    }

    #[test]
    fn zero_instance_count_drops_the_indirect_draw() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 3 * 12];
        client_attrib(&mut ctx, &mut vao, 0, 3, &data);
        let commands = [
            DrawArraysCommand { count: 3, prim_count: 1, first: 0, base_instance: 0 },
            DrawArraysCommand { count: 3, prim_count: 0, first: 3, base_instance: 0 },
        ];

        let result = unsafe {
            vao.multi_draw_arrays_indirect(
                &mut ctx,
                TRIANGLES,
                commands.as_ptr() as *const c_void,
                2,
                0,
            )
        };
        assert_eq!(result, Err(DrawError::InvalidInstanceCount { draw: 1, prim_count: 0 }));
        assert!(ctx.driver.calls().is_empty());
    }

    #[test]
    fn bound_indirect_buffer_is_read_through_a_map() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 2 * 16];
        client_attrib(&mut ctx, &mut vao, 0, 2, &data);
        let indices: [u16; 4] = [0, 5, 6, 1];
        ctx.driver.preload_buffer(ELEMENT_ARRAY_BUFFER, 20, &as_bytes(&indices));
        vao.shadow_buffer_binding(ELEMENT_ARRAY_BUFFER, 20);
        let command = DrawElementsCommand {
            count: 2,
            prim_count: 1,
            first_index: 1,
            base_vertex: 1,
            base_instance: 0,
        };
        let mut records = vec![0u8; 8];
        records.extend(as_bytes(&[command]));
        ctx.driver.preload_buffer(DRAW_INDIRECT_BUFFER, 21, &records);

        unsafe {
            vao.draw_elements_indirect(&mut ctx, TRIANGLES, UNSIGNED_SHORT, 8 as *const c_void)
        }
        .unwrap();
        let calls = ctx.driver.take_calls();
        assert_eq!(
            calls[0],
            Call::MapBufferRange { target: DRAW_INDIRECT_BUFFER, offset: 8, length: 20 }
        );
        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![8 * 8]);
        assert_eq!(
            calls.last(),
            Some(&Call::DrawElementsIndirect {
                mode: TRIANGLES,
                type_: UNSIGNED_SHORT,
                indirect: 8,
            })
        );
        assert!(uploads(&calls, DRAW_INDIRECT_BUFFER).is_empty());
    }

    #[test]
    fn indirect_count_without_parameter_buffer_reads_client_count() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 3 * 12];
        client_attrib(&mut ctx, &mut vao, 0, 3, &data);
        let commands = [
            DrawArraysCommand { count: 3, prim_count: 1, first: 0, base_instance: 0 },
            DrawArraysCommand { count: 3, prim_count: 1, first: 9, base_instance: 0 },
        ];
        let count: GLsizei = 5;

        unsafe {
            vao.multi_draw_arrays_indirect_count(
                &mut ctx,
                TRIANGLES,
                commands.as_ptr() as *const c_void,
                &count as *const GLsizei as GLintptr,
                1,
                0,
            )
        }
        .unwrap();
        let calls = ctx.driver.take_calls();
        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![12 * 3]);
        assert!(calls.contains(&Call::MultiDrawArraysIndirect {
            mode: TRIANGLES,
            indirect: 0,
            draw_count: 1,
            stride: 0
        }));

        let result = unsafe {
            vao.multi_draw_arrays_indirect_count(
                &mut ctx,
                TRIANGLES,
                commands.as_ptr() as *const c_void,
                0,
                4,
                0,
            )
        };
        assert_eq!(result, Err(DrawError::MissingDrawCount));
    }

    #[test]
    fn indirect_count_reads_the_parameter_buffer() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 3 * 12];
        client_attrib(&mut ctx, &mut vao, 0, 3, &data);
        let commands = [
            DrawArraysCommand { count: 3, prim_count: 1, first: 0, base_instance: 0 },
            DrawArraysCommand { count: 3, prim_count: 1, first: 3, base_instance: 0 },
        ];
        ctx.driver.preload_buffer(PARAMETER_BUFFER, 50, &as_bytes(&[0i32, 2]));

        unsafe {
            vao.multi_draw_arrays_indirect_count(
                &mut ctx,
                TRIANGLES,
                commands.as_ptr() as *const c_void,
                4,
                8,
                0,
            )
        }
        .unwrap();
        let calls = ctx.driver.take_calls();
        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![12 * 6]);
        assert_eq!(uploads(&calls, DRAW_INDIRECT_BUFFER), vec![32]);
        assert!(calls.contains(&Call::MultiDrawArraysIndirectCount {
            mode: TRIANGLES,
            indirect: 0,
            draw_count: 4,
            max_draw_count: 8,
            stride: 0
        }));

        ctx.driver.preload_buffer(PARAMETER_BUFFER, 50, &as_bytes(&[0i32, 0]));
        let result = unsafe {
            vao.multi_draw_arrays_indirect_count(
                &mut ctx,
                TRIANGLES,
                commands.as_ptr() as *const c_void,
                4,
                8,
                0,
            )
        };
        assert_eq!(result, Err(DrawError::EmptyDrawCount(0)));
    }

    #[test]
    fn multi_draw_elements_indirect_applies_first_index_and_base_vertex() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 2 * 12];
        client_attrib(&mut ctx, &mut vao, 0, 2, &data);
        let indices: [u16; 6] = [9, 0, 3, 7, 2, 4];
        ctx.driver.preload_buffer(ELEMENT_ARRAY_BUFFER, 20, &as_bytes(&indices));
        vao.shadow_buffer_binding(ELEMENT_ARRAY_BUFFER, 20);
        let commands = [
            DrawElementsCommand {
                count: 2,
                prim_count: 1,
                first_index: 1,
                base_vertex: 0,
                base_instance: 0,
            },
            DrawElementsCommand {
                count: 3,
                prim_count: 1,
                first_index: 3,
                base_vertex: 2,
                base_instance: 0,
            },
        ];

        unsafe {
            vao.multi_draw_elements_indirect(
                &mut ctx,
                TRIANGLES,
                UNSIGNED_SHORT,
                commands.as_ptr() as *const c_void,
                2,
                0,
            )
        }
        .unwrap();
        let calls = ctx.driver.take_calls();
        // Index 9 is never read; the largest is 7 + 2.
        assert_eq!(
            calls[0],
            Call::MapBufferRange { target: ELEMENT_ARRAY_BUFFER, offset: 2, length: 10 }
        );
        assert_eq!(calls[1], Call::UnmapBuffer { target: ELEMENT_ARRAY_BUFFER });
        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![8 * 10]);
        assert_eq!(uploads(&calls, DRAW_INDIRECT_BUFFER), vec![40]);
        assert!(calls.contains(&Call::MultiDrawElementsIndirect {
            mode: TRIANGLES,
            type_: UNSIGNED_SHORT,
            indirect: 0,
            draw_count: 2,
            stride: 0
        }));
    }

    #[test]
    fn indirect_elements_without_element_buffer_abort() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 3 * 4];
        client_attrib(&mut ctx, &mut vao, 0, 3, &data);
        let command = DrawElementsCommand {
            count: 3,
            prim_count: 1,
            first_index: 0,
            base_vertex: 0,
            base_instance: 0,
        };

        let result = unsafe {
            vao.draw_elements_indirect(
                &mut ctx,
                TRIANGLES,
                UNSIGNED_SHORT,
                &command as *const _ as *const c_void,
            )
        };
        assert_eq!(result, Err(DrawError::MissingClientPointer));
        assert!(ctx.driver.calls().is_empty());
    }

    #[test]
    fn zero_instance_count_in_a_bound_indirect_buffer_drops_the_draw() {
        let (mut ctx, mut vao) = setup();
        let data = [0f32; 2 * 8];
        client_attrib(&mut ctx, &mut vao, 0, 2, &data);
        let indices: [u16; 4] = [0, 1, 2, 3];
        ctx.driver.preload_buffer(ELEMENT_ARRAY_BUFFER, 20, &as_bytes(&indices));
        vao.shadow_buffer_binding(ELEMENT_ARRAY_BUFFER, 20);
        let commands = [
            DrawElementsCommand {
                count: 3,
                prim_count: 1,
                first_index: 0,
                base_vertex: 0,
                base_instance: 0,
            },
            DrawElementsCommand {
                count: 3,
                prim_count: 0,
                first_index: 1,
                base_vertex: 0,
                base_instance: 0,
            },
        ];
        ctx.driver.preload_buffer(DRAW_INDIRECT_BUFFER, 21, &as_bytes(&commands));

        let result = unsafe {
            vao.multi_draw_elements_indirect(
                &mut ctx,
                TRIANGLES,
                UNSIGNED_SHORT,
                std::ptr::null(),
                2,
                0,
            )
        };
        assert_eq!(result, Err(DrawError::InvalidInstanceCount { draw: 1, prim_count: 0 }));
        assert_eq!(
            ctx.driver.take_calls(),
            vec![
                Call::MapBufferRange { target: DRAW_INDIRECT_BUFFER, offset: 0, length: 40 },
                Call::UnmapBuffer { target: DRAW_INDIRECT_BUFFER },
            ]
        );
    }

    /// Two commands over a bound element buffer reading up to vertex 8.
    fn elements_count_setup() -> (Context<RecordingDriver>, Vao, [DrawElementsCommand; 2]) {
        let (mut ctx, mut vao) = setup();
        let indices: [u16; 6] = [0, 1, 2, 5, 6, 7];
        ctx.driver.preload_buffer(ELEMENT_ARRAY_BUFFER, 20, &as_bytes(&indices));
        vao.shadow_buffer_binding(ELEMENT_ARRAY_BUFFER, 20);
        let commands = [
            DrawElementsCommand {
                count: 3,
                prim_count: 1,
                first_index: 0,
                base_vertex: 0,
                base_instance: 0,
            },
            DrawElementsCommand {
                count: 3,
                prim_count: 1,
                first_index: 3,
                base_vertex: 1,
                base_instance: 0,
            },
        ];
        (ctx, vao, commands)
    }

    #[test]
    fn elements_indirect_count_without_parameter_buffer_reads_client_count() {
        let (mut ctx, mut vao, commands) = elements_count_setup();
        let data = [0f32; 3 * 9];
        client_attrib(&mut ctx, &mut vao, 0, 3, &data);
        let count: GLsizei = 2;

        unsafe {
            vao.multi_draw_elements_indirect_count(
                &mut ctx,
                TRIANGLES,
                UNSIGNED_SHORT,
                commands.as_ptr() as *const c_void,
                &count as *const GLsizei as GLintptr,
                4,
                0,
            )
        }
        .unwrap();
        let calls = ctx.driver.take_calls();
        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![12 * 9]);
        assert_eq!(uploads(&calls, DRAW_INDIRECT_BUFFER), vec![40]);
        assert!(calls.contains(&Call::MultiDrawElementsIndirect {
            mode: TRIANGLES,
            type_: UNSIGNED_SHORT,
            indirect: 0,
            draw_count: 2,
            stride: 0
        }));
        assert!(!calls.iter().any(|c| matches!(c, Call::MultiDrawElementsIndirectCount { .. })));
    }

    #[test]
    fn elements_indirect_count_reads_the_parameter_buffer() {
        let (mut ctx, mut vao, commands) = elements_count_setup();
        let data = [0f32; 3 * 9];
        client_attrib(&mut ctx, &mut vao, 0, 3, &data);
        ctx.driver.preload_buffer(PARAMETER_BUFFER, 50, &as_bytes(&[0i32, 2]));

        unsafe {
            vao.multi_draw_elements_indirect_count(
                &mut ctx,
                TRIANGLES,
                UNSIGNED_SHORT,
                commands.as_ptr() as *const c_void,
                4,
                8,
                0,
            )
        }
        .unwrap();
        let calls = ctx.driver.take_calls();
        assert_eq!(uploads(&calls, ARRAY_BUFFER), vec![12 * 9]);
        assert_eq!(uploads(&calls, DRAW_INDIRECT_BUFFER), vec![40]);
        assert!(calls.contains(&Call::MultiDrawElementsIndirectCount {
            mode: TRIANGLES,
            type_: UNSIGNED_SHORT,
            indirect: 0,
            draw_count: 4,
            max_draw_count: 8,
            stride: 0
        }));
    }

    #[test]
    fn failed_temporary_allocation_skips_the_draw() {
        let (mut ctx, vao) = setup();
        let command = DrawArraysCommand { count: 3, prim_count: 1, first: 0, base_instance: 0 };
        ctx.driver.fail_gen = true;
        let result = unsafe {
            vao.draw_arrays_indirect(&mut ctx, TRIANGLES, &command as *const _ as *const c_void)
        };
        assert_eq!(result, Err(DrawError::BufferAllocation { target: DRAW_INDIRECT_BUFFER }));
        assert!(ctx.driver.draws().is_empty());
    }

    #[test]
    fn shadow_buffers_survive_draws_until_the_object_is_deleted() {
        let (mut ctx, mut vao) = setup();
        let name = vao.gen_vertex_arrays(1)[0];
        vao.bind_vertex_array(&mut ctx, name);
        let data = [0f32; 4 * 3];
        client_attrib(&mut ctx, &mut vao, 0, 4, &data);
        let shadow = vao.current().arrays[0].shadow_buffer;

        unsafe { vao.draw_arrays(&mut ctx, TRIANGLES, 0, 3) }.unwrap();
        unsafe { vao.draw_arrays(&mut ctx, TRIANGLES, 0, 3) }.unwrap();
        assert!(ctx.driver.is_buffer(shadow));
        let gens = ctx
            .driver
            .calls()
            .iter()
            .filter(|c| matches!(c, Call::GenBuffers { .. }))
            .count();
        assert_eq!(gens, 0);

        vao.delete_vertex_arrays(&mut ctx, &[name]);
        assert!(!ctx.driver.is_buffer(shadow));
    }

    #[test]
    fn max_index_helpers() {
        let bytes = as_bytes(&[7u32, 0xFFFF_FFFF, 2]);
        unsafe {
            assert_eq!(max_index(bytes.as_ptr(), UNSIGNED_INT, 3, None), Some(0xFFFF_FFFF));
            assert_eq!(max_index(bytes.as_ptr(), UNSIGNED_INT, 3, Some(0xFFFF_FFFF)), Some(7));
            assert_eq!(max_index(bytes.as_ptr(), FLOAT, 3, None), None);
        }
        assert_eq!(arrays_extent(vec![(4, 0), (0, 2)]), 2);
        assert_eq!(arrays_extent(vec![(0, MAX_COUNT + 1)]), 0);
        assert_eq!(command_bytes::<DrawArraysCommand>(0, 3), 48);
        assert_eq!(command_bytes::<DrawArraysCommand>(32, 2), 48);
    }
}
