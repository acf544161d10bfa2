use core::any::Any;
use core::fmt;

use crate::helper::RttiHelper;
use crate::registry::TypeRegistry;
use crate::{TypeUuid, Typed};

// -----------------------------------------------------------------------------
// RttiKind

/// How a type provides its hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RttiKind {
    /// Declared with `#[derive(TypeInfo)]` or `impl_type_info!`: only matches itself.
    TypeInfoOnly,
    /// Declared with `#[derive(Rtti)]` on the type definition.
    Intrusive,
    /// Declared with `impl_external_rtti!`, away from the type definition.
    External,
}

impl RttiKind {
    /// Returns `true` if bases are known.
    #[inline]
    pub const fn is_full(self) -> bool {
        !matches!(self, RttiKind::TypeInfoOnly)
    }
}

impl fmt::Display for RttiKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RttiKind::TypeInfoOnly => "type info only",
            RttiKind::Intrusive => "intrusive",
            RttiKind::External => "external",
        })
    }
}

// -----------------------------------------------------------------------------
// Rtti

/// Static hierarchy of a declared type.
///
/// Implemented by `#[derive(Rtti)]`, `#[derive(TypeInfo)]`, `impl_type_info!`
/// and `impl_external_rtti!`. Callers usually go through the functions of
/// [`cast`](crate::cast) instead of using this trait directly.
///
/// # Examples
///
/// ```
/// use vc_rtti::{Rtti, Typed, derive::Rtti};
///
/// #[derive(Rtti, Default)]
/// #[rtti(uuid = "{8D1F6C2A-3B47-4E90-A5D8-71C2E9B04F36}")]
/// struct Shape {
///     sides: u32,
/// }
///
/// #[derive(Rtti, Default)]
/// #[rtti(uuid = "{C4A97E15-08B3-4F6D-92E1-5B7D3A6C8F02}")]
/// struct Square {
///     #[rtti(base)]
///     shape: Shape,
///     side: f32,
/// }
///
/// assert!(Square::rtti_contains_type(Shape::type_uuid()));
/// assert!(!Shape::rtti_contains_type(Square::type_uuid()));
///
/// let mut visited = Vec::new();
/// Square::rtti_enum_hierarchy(&mut |uuid| visited.push(uuid));
/// assert_eq!(visited, [Square::type_uuid(), Shape::type_uuid()]);
///
/// let square = Square::default();
/// let shape = square.rtti_subobject(Shape::type_uuid()).unwrap();
/// assert!(core::ptr::addr_eq(shape, &square.shape));
/// ```
///
/// A base must itself be declared:
///
/// ```compile_fail
/// use vc_rtti::derive::Rtti;
///
/// struct Undeclared;
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{4B7E1D93-A0C5-4F28-9E6B-D13F85A2C709}")]
/// struct Holder {
///     #[rtti(base)]
///     inner: Undeclared,
/// }
/// ```
///
/// A type is declared once, with one of the macros:
///
/// ```compile_fail
/// use vc_rtti::derive::{Rtti, TypeInfo};
///
/// #[derive(Rtti, TypeInfo)]
/// #[rtti(uuid = "{E5A2C8F1-37D4-4B96-A0E2-6C9F1B3D85A7}")]
/// struct Twice;
/// ```
///
/// ```compile_fail
/// use vc_rtti::derive::Rtti;
///
/// #[derive(Rtti)]
/// #[rtti(uuid = "{E5A2C8F1-37D4-4B96-A0E2}")]
/// struct Truncated;
/// ```
pub trait Rtti: Typed {
    const KIND: RttiKind;

    /// Returns `true` if `uuid` is this type or one of its bases, transitively.
    fn rtti_contains_type(uuid: TypeUuid) -> bool;

    /// Calls `visitor` with this type, then with the hierarchy of each base
    /// in declaration order. Repeated bases are visited every time.
    fn rtti_enum_hierarchy(visitor: &mut dyn FnMut(TypeUuid));

    /// Returns the subobject of type `uuid`: `self`, or the first base field
    /// containing that type.
    fn rtti_subobject(&self, uuid: TypeUuid) -> Option<&dyn Any>;

    /// Mutable version of [`rtti_subobject`](Rtti::rtti_subobject).
    fn rtti_subobject_mut(&mut self, uuid: TypeUuid) -> Option<&mut dyn Any>;

    /// The helper singleton of this type.
    fn rtti_helper() -> &'static dyn RttiHelper;

    /// Registers the bases of this type, called by
    /// [`TypeRegistry::register`](crate::registry::TypeRegistry::register).
    #[inline]
    fn rtti_register_bases(_registry: &mut TypeRegistry) {}
}

// -----------------------------------------------------------------------------
// Tests

#[cfg(test)]
mod tests {
    use crate::derive::{Rtti, TypeInfo, impl_type_info};
    use crate::{Rtti, RttiKind, TypeTraits, TypeUuid, Typed, rtti_cast, rtti_helper_of};
    use alloc::vec::Vec;

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{CB3ECF4C-0AE6-40D3-B3AC-B35CB14488A0}")]
    struct Part0(u8);

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{9ADF204F-5937-40F0-827C-7325EAE51884}")]
    struct Part1(u8);

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{51CDD89A-915A-487E-B39F-4450D6B8AEC9}")]
    struct Part2(u8);

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{47F445A6-C12F-4C68-87E4-02680D11DAF8}")]
    struct Part3(u8);

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{2395D415-FCF4-4C94-ACA4-5F7547E07BCF}")]
    struct Part4(u8);

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{F957DA5F-FD27-4F57-9E22-311DED089433}")]
    struct Part5(u8);

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{B1571CB4-BC86-4443-8292-962FBD829CEB}")]
    struct Assembly {
        #[rtti(base)]
        p0: Part0,
        #[rtti(base)]
        p1: Part1,
        #[rtti(base)]
        p2: Part2,
        #[rtti(base)]
        p3: Part3,
        #[rtti(base)]
        p4: Part4,
        #[rtti(base)]
        p5: Part5,
    }

    #[derive(Rtti, Default)]
    #[rtti(uuid = "{48D43CE7-21F9-40C7-B077-7E0C5448B8A4}")]
    struct Wrapped(u16, #[rtti(base)] Part2);

    #[derive(Rtti)]
    #[rtti(uuid = "{35923D3B-DB4B-427B-B615-6CA581903345}")]
    struct Grid<T, const N: usize> {
        #[rtti(base)]
        origin: Part0,
        cells: [T; N],
    }

    #[derive(Rtti)]
    #[rtti(uuid = "{A3D7805D-BD94-4BCE-A079-C339DD52B40B}")]
    struct Layer<T> {
        #[rtti(base)]
        inner: T,
    }

    #[derive(TypeInfo, Clone, Copy)]
    #[rtti(uuid = "{ED343205-C3CE-4F0A-8D06-BBD87FBD4285}", name = "Mode")]
    enum RenderMode {
        Opaque,
        Blend,
    }

    #[derive(Rtti)]
    #[rtti(uuid = "{80BE5592-336F-480B-AF60-8FE03C5EC139}", abstract)]
    struct Surface;

    struct Slot<T>(T);

    impl_type_info!([T] Slot<T>, "{6074E875-F1F5-48C8-9306-FEC3D98C2B16}");

    fn hierarchy<T: Rtti>() -> Vec<TypeUuid> {
        let mut visited = Vec::new();
        T::rtti_enum_hierarchy(&mut |uuid| visited.push(uuid));
        visited
    }

    #[test]
    fn more_than_five_bases() {
        assert_eq!(
            hierarchy::<Assembly>(),
            [
                Assembly::type_uuid(),
                Part0::type_uuid(),
                Part1::type_uuid(),
                Part2::type_uuid(),
                Part3::type_uuid(),
                Part4::type_uuid(),
                Part5::type_uuid(),
            ]
        );

        let mut assembly = Assembly::default();
        assembly.p5.0 = 5;
        assert_eq!(rtti_cast::<Part5, _>(&assembly).map(|p| p.0), Some(5));
        assert!(core::ptr::eq(rtti_cast::<Part3, _>(&assembly).unwrap(), &assembly.p3));
        assert!(rtti_cast::<Wrapped, _>(&assembly).is_none());
    }

    #[test]
    fn tuple_field_base() {
        let wrapped = Wrapped(1, Part2(2));
        assert_eq!(rtti_cast::<Part2, _>(&wrapped).map(|p| p.0), Some(2));
        assert_eq!(hierarchy::<Wrapped>().len(), 2);
        assert_eq!(Wrapped::KIND, RttiKind::Intrusive);
    }

    #[test]
    fn generic_declarations() {
        let template = TypeUuid::parse("{35923D3B-DB4B-427B-B615-6CA581903345}");
        let len = TypeUuid::from_data(&4_u64.to_le_bytes());

        assert_eq!(<Grid<u8, 4>>::template_uuid(), template);
        assert_eq!(<Grid<u8, 4>>::type_uuid(), template + (u8::type_uuid() + len));
        assert_ne!(<Grid<u8, 4>>::type_uuid(), <Grid<u8, 5>>::type_uuid());
        assert_eq!(<Grid<u8, 4>>::type_name(), "Grid<u8, 4>");
        assert!(<Grid<u8, 4>>::type_info().is_template());

        let grid = Grid::<u8, 4> {
            origin: Part0(3),
            cells: [0; 4],
        };
        assert_eq!(rtti_cast::<Part0, _>(&grid).map(|p| p.0), Some(3));
        assert_eq!(grid.cells.len(), 4);

        let layer = Layer { inner: Part1(8) };
        assert_eq!(rtti_cast::<Part1, _>(&layer).map(|p| p.0), Some(8));
        assert!(<Layer<Part1>>::rtti_contains_type(Part1::type_uuid()));
        assert!(!<Layer<Part2>>::rtti_contains_type(Part1::type_uuid()));
        assert_eq!(<Layer<Part1>>::type_name(), "Layer<Part1>");
    }

    #[test]
    fn declared_traits() {
        assert_eq!(RenderMode::type_name(), "Mode");
        assert_eq!(RenderMode::type_traits(), TypeTraits::IS_ENUM);
        assert_eq!(RenderMode::KIND, RttiKind::TypeInfoOnly);
        assert!(rtti_cast::<RenderMode, _>(&RenderMode::Blend).is_some());
        assert!(matches!(RenderMode::Opaque, RenderMode::Opaque));

        assert!(Surface::type_info().is_abstract());
        assert!(rtti_helper_of::<Surface>().is_abstract());
        assert!(Surface::rtti_contains_type(Surface::type_uuid()));
        assert!(!Part0::type_info().is_abstract());
    }

    #[test]
    fn declared_away_from_definition() {
        let template = TypeUuid::parse("{6074E875-F1F5-48C8-9306-FEC3D98C2B16}");
        assert_eq!(<Slot<u8>>::type_uuid(), template + u8::type_uuid());
        assert_eq!(<Slot<u8>>::type_name(), "Slot<u8>");
        assert_eq!(<Slot<u8>>::KIND, RttiKind::TypeInfoOnly);

        let slot = Slot(2_u8);
        assert_eq!(rtti_cast::<Slot<u8>, _>(&slot).map(|s| s.0), Some(2));
        assert!(rtti_cast::<Slot<i8>, _>(&slot).is_none());
    }
}
