/// Access to a base of `Self` for types whose hierarchy is declared with
/// [`impl_external_rtti!`](crate::derive::impl_external_rtti).
///
/// `impl_external_rtti!(Type, "{uuid}", Base(field))` implements it from a
/// field path. Write it by hand when the base is reached some other way.
///
/// # Examples
///
/// ```
/// use vc_rtti::{BaseOf, rtti_cast, derive::{impl_external_rtti, impl_type_info}};
///
/// pub struct Position(pub f32, pub f32);
/// pub struct Marker { pub at: Position }
///
/// impl_type_info!(Position, "{9C3B5E17-4A2D-4F81-B6E0-D8A7C1F52E49}");
/// impl_external_rtti!(Marker, "{1E6F4D29-8B3C-4A57-9D12-F0C6A8E3B745}", Position);
///
/// impl BaseOf<Position> for Marker {
///     fn as_base(&self) -> &Position { &self.at }
///     fn as_base_mut(&mut self) -> &mut Position { &mut self.at }
/// }
///
/// let marker = Marker { at: Position(1.0, 2.0) };
/// let at: &Position = rtti_cast(&marker).unwrap();
/// assert_eq!(at.1, 2.0);
/// ```
pub trait BaseOf<B>: 'static {
    fn as_base(&self) -> &B;

    fn as_base_mut(&mut self) -> &mut B;
}
