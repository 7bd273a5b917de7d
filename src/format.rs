//! Component types, legacy array kinds and the interleaved array layouts.

use crate::enums::*;
use gl::types::{GLenum, GLint, GLsizei};

// ----------------------------------------------------------------------------

/// The value kind stored in one component of a vertex array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComponentType {
    Byte,
    UnsignedByte,
    Short,
    UnsignedShort,
    Int,
    UnsignedInt,
    HalfFloat,
    Float,
    Double,
    Fixed,
    Int2_10_10_10Rev,
    UnsignedInt2_10_10_10Rev,
    UnsignedInt10f11f11fRev,
    Bool,
}

impl ComponentType {
    pub fn from_gl(ty: GLenum) -> Option<Self> {
        use ComponentType::*;
        Some(match ty {
            BYTE => Byte,
            UNSIGNED_BYTE => UnsignedByte,
            SHORT => Short,
            UNSIGNED_SHORT => UnsignedShort,
            INT => Int,
            UNSIGNED_INT => UnsignedInt,
            HALF_FLOAT => HalfFloat,
            FLOAT => Float,
            DOUBLE => Double,
            FIXED => Fixed,
            INT_2_10_10_10_REV => Int2_10_10_10Rev,
            UNSIGNED_INT_2_10_10_10_REV => UnsignedInt2_10_10_10Rev,
            UNSIGNED_INT_10F_11F_11F_REV => UnsignedInt10f11f11fRev,
            BOOL => Bool,
            _ => return None,
        })
    }

    pub fn to_gl(self) -> GLenum {
        use ComponentType::*;
        match self {
            Byte => BYTE,
            UnsignedByte => UNSIGNED_BYTE,
            Short => SHORT,
            UnsignedShort => UNSIGNED_SHORT,
            Int => INT,
            UnsignedInt => UNSIGNED_INT,
            HalfFloat => HALF_FLOAT,
            Float => FLOAT,
            Double => DOUBLE,
            Fixed => FIXED,
            Int2_10_10_10Rev => INT_2_10_10_10_REV,
            UnsignedInt2_10_10_10Rev => UNSIGNED_INT_2_10_10_10_REV,
            UnsignedInt10f11f11fRev => UNSIGNED_INT_10F_11F_11F_REV,
            Bool => BOOL,
        }
    }

    /// Size in bytes of one component, or of the whole packed word for the
    /// packed types.
    pub fn size(self) -> usize {
        use ComponentType::*;
        match self {
            Byte | UnsignedByte | Bool => 1,
            Short | UnsignedShort | HalfFloat => 2,
            Int | UnsignedInt | Float | Fixed => 4,
            Int2_10_10_10Rev | UnsignedInt2_10_10_10Rev | UnsignedInt10f11f11fRev => 4,
            Double => 8,
        }
    }

    /// All components share one 32 bit word.
    pub fn is_packed(self) -> bool {
        matches!(
            self,
            ComponentType::Int2_10_10_10Rev
                | ComponentType::UnsignedInt2_10_10_10Rev
                | ComponentType::UnsignedInt10f11f11fRev
        )
    }
}

/// Byte size of one component of `ty`, 0 for unknown types.
pub fn type_size(ty: GLenum) -> usize {
    ComponentType::from_gl(ty).map_or(0, ComponentType::size)
}

/// Number of components described by a `size` argument. BGRA counts as four.
pub fn component_count(size: GLint) -> usize {
    if size == BGRA as GLint {
        4
    } else {
        size.max(0) as usize
    }
}

/// Byte size of one element of an attribute.
pub fn element_size(size: GLint, ty: GLenum) -> usize {
    match ComponentType::from_gl(ty) {
        Some(t) if t.is_packed() => 4,
        Some(t) => t.size() * component_count(size),
        None => 0,
    }
}

/// The stride the driver actually steps by: `stride`, or the tightly packed
/// element size when `stride` is 0.
pub fn effective_stride(size: GLint, ty: GLenum, stride: GLsizei) -> GLsizei {
    if stride != 0 {
        stride
    } else if size == BGRA as GLint {
        4
    } else {
        element_size(size, ty) as GLsizei
    }
}

/// Validates the arguments of a generic attribute pointer call.
pub fn valid_attrib_pointer(size: GLint, ty: GLenum, normalized: bool, stride: GLsizei) -> bool {
    if stride < 0 {
        return false;
    }
    let ty = match ComponentType::from_gl(ty) {
        Some(ComponentType::Fixed) | Some(ComponentType::Bool) | None => return false,
        Some(ty) => ty,
    };
    if size == BGRA as GLint {
        let bgra_type = matches!(
            ty,
            ComponentType::UnsignedByte
                | ComponentType::Int2_10_10_10Rev
                | ComponentType::UnsignedInt2_10_10_10Rev
        );
        return bgra_type && normalized;
    }
    if !(1..=4).contains(&size) {
        return false;
    }
    if ty.is_packed() {
        return size == 4;
    }
    true
}

// ----------------------------------------------------------------------------

/// Legacy fixed-function client arrays, in their slot order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArrayKind {
    Vertex,
    Normal,
    FogCoord,
    Color,
    SecondaryColor,
    Index,
    EdgeFlag,
    TexCoord(usize),
}

/// Number of legacy arrays that precede the texture coordinate arrays.
pub const FIXED_ARRAY_COUNT: usize = 7;

/// Total number of named arrays, including one per texture unit.
pub const NAMED_ARRAY_COUNT: usize = FIXED_ARRAY_COUNT + MAX_TEXTURE_COORDS;

impl ArrayKind {
    pub fn slot(self) -> usize {
        match self {
            ArrayKind::Vertex => 0,
            ArrayKind::Normal => 1,
            ArrayKind::FogCoord => 2,
            ArrayKind::Color => 3,
            ArrayKind::SecondaryColor => 4,
            ArrayKind::Index => 5,
            ArrayKind::EdgeFlag => 6,
            ArrayKind::TexCoord(unit) => FIXED_ARRAY_COUNT + unit,
        }
    }

    pub fn from_slot(slot: usize) -> Option<Self> {
        Some(match slot {
            0 => ArrayKind::Vertex,
            1 => ArrayKind::Normal,
            2 => ArrayKind::FogCoord,
            3 => ArrayKind::Color,
            4 => ArrayKind::SecondaryColor,
            5 => ArrayKind::Index,
            6 => ArrayKind::EdgeFlag,
            s if s < NAMED_ARRAY_COUNT => ArrayKind::TexCoord(s - FIXED_ARRAY_COUNT),
            _ => return None,
        })
    }

    /// Maps a client state capability to its array. Texture coordinates use
    /// `unit`, which must already be in range.
    pub fn from_cap(cap: GLenum, unit: usize) -> Option<Self> {
        Some(match cap {
            VERTEX_ARRAY => ArrayKind::Vertex,
            NORMAL_ARRAY => ArrayKind::Normal,
            FOG_COORD_ARRAY => ArrayKind::FogCoord,
            COLOR_ARRAY => ArrayKind::Color,
            SECONDARY_COLOR_ARRAY => ArrayKind::SecondaryColor,
            INDEX_ARRAY => ArrayKind::Index,
            EDGE_FLAG_ARRAY => ArrayKind::EdgeFlag,
            TEXTURE_COORD_ARRAY if unit < MAX_TEXTURE_COORDS => ArrayKind::TexCoord(unit),
            _ => return None,
        })
    }

    pub fn cap(self) -> GLenum {
        match self {
            ArrayKind::Vertex => VERTEX_ARRAY,
            ArrayKind::Normal => NORMAL_ARRAY,
            ArrayKind::FogCoord => FOG_COORD_ARRAY,
            ArrayKind::Color => COLOR_ARRAY,
            ArrayKind::SecondaryColor => SECONDARY_COLOR_ARRAY,
            ArrayKind::Index => INDEX_ARRAY,
            ArrayKind::EdgeFlag => EDGE_FLAG_ARRAY,
            ArrayKind::TexCoord(_) => TEXTURE_COORD_ARRAY,
        }
    }

    pub fn default_size(self) -> GLint {
        match self {
            ArrayKind::Normal | ArrayKind::SecondaryColor => 3,
            ArrayKind::FogCoord | ArrayKind::Index | ArrayKind::EdgeFlag => 1,
            _ => 4,
        }
    }

    pub fn default_type(self) -> GLenum {
        match self {
            ArrayKind::EdgeFlag => BOOL,
            _ => FLOAT,
        }
    }

    /// Whether the driver normalizes integer data fed through this array.
    pub fn normalized(self) -> bool {
        matches!(
            self,
            ArrayKind::Normal | ArrayKind::Color | ArrayKind::SecondaryColor
        )
    }

    /// Validates the arguments of the legacy pointer call for this kind.
    /// Kinds with a fixed size ignore `size`, and the edge flag has no type.
    pub fn accepts(self, size: GLint, ty: GLenum, stride: GLsizei) -> bool {
        if stride < 0 {
            return false;
        }
        let size_ok = match self {
            ArrayKind::Vertex => (2..=4).contains(&size),
            ArrayKind::Color => size == 3 || size == 4,
            ArrayKind::SecondaryColor => size == 3,
            ArrayKind::TexCoord(_) => (1..=4).contains(&size),
            _ => true,
        };
        let type_ok = match self {
            ArrayKind::Vertex | ArrayKind::TexCoord(_) => {
                matches!(ty, SHORT | INT | FLOAT | DOUBLE)
            }
            ArrayKind::Normal => matches!(ty, BYTE | SHORT | INT | FLOAT | DOUBLE),
            ArrayKind::Color | ArrayKind::SecondaryColor => matches!(
                ty,
                BYTE | UNSIGNED_BYTE
                    | SHORT
                    | UNSIGNED_SHORT
                    | INT
                    | UNSIGNED_INT
                    | FLOAT
                    | DOUBLE
            ),
            ArrayKind::Index => matches!(ty, UNSIGNED_BYTE | SHORT | INT | FLOAT | DOUBLE),
            ArrayKind::FogCoord => matches!(ty, FLOAT | DOUBLE),
            ArrayKind::EdgeFlag => true,
        };
        size_ok && type_ok
    }
}

// ----------------------------------------------------------------------------

/// Decoded layout of one `glInterleavedArrays` format.
///
/// Sizes of 0 mean the array is disabled by the format. Offsets are in bytes
/// from the start of each vertex.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct InterleavedLayout {
    pub tex_coord_size: GLint,
    pub color_size: GLint,
    pub color_type: GLenum,
    pub normal: bool,
    pub vertex_size: GLint,
    pub color_offset: usize,
    pub normal_offset: usize,
    pub vertex_offset: usize,
    pub stride: GLsizei,
}

impl InterleavedLayout {
    pub fn from_format(format: GLenum) -> Option<Self> {
        const F: usize = 4;
        const C: usize = 4;

        // (st, sc, color type, en, sv, pc, pn, pv, s)
        let (st, sc, ct, en, sv, pc, pn, pv, s) = match format {
            V2F => (0, 0, FLOAT, false, 2, 0, 0, 0, 2 * F),
            V3F => (0, 0, FLOAT, false, 3, 0, 0, 0, 3 * F),
            C4UB_V2F => (0, 4, UNSIGNED_BYTE, false, 2, 0, 0, C, C + 2 * F),
            C4UB_V3F => (0, 4, UNSIGNED_BYTE, false, 3, 0, 0, C, C + 3 * F),
            C3F_V3F => (0, 3, FLOAT, false, 3, 0, 0, 3 * F, 6 * F),
            N3F_V3F => (0, 0, FLOAT, true, 3, 0, 0, 3 * F, 6 * F),
            C4F_N3F_V3F => (0, 4, FLOAT, true, 3, 0, 4 * F, 7 * F, 10 * F),
            T2F_V3F => (2, 0, FLOAT, false, 3, 0, 0, 2 * F, 5 * F),
            T4F_V4F => (4, 0, FLOAT, false, 4, 0, 0, 4 * F, 8 * F),
            T2F_C4UB_V3F => (2, 4, UNSIGNED_BYTE, false, 3, 2 * F, 0, C + 2 * F, C + 5 * F),
            T2F_C3F_V3F => (2, 3, FLOAT, false, 3, 2 * F, 0, 5 * F, 8 * F),
            T2F_N3F_V3F => (2, 0, FLOAT, true, 3, 0, 2 * F, 5 * F, 8 * F),
            T2F_C4F_N3F_V3F => (2, 4, FLOAT, true, 3, 2 * F, 6 * F, 9 * F, 12 * F),
            T4F_C4F_N3F_V4F => (4, 4, FLOAT, true, 4, 4 * F, 8 * F, 11 * F, 15 * F),
            _ => return None,
        };

        Some(InterleavedLayout {
            tex_coord_size: st,
            color_size: sc,
            color_type: ct,
            normal: en,
            vertex_size: sv,
            color_offset: pc,
            normal_offset: pn,
            vertex_offset: pv,
            stride: s as GLsizei,
        })
    }
}

// ----------------------------------------------------------------------------
