/// Implemented by objects holding channel subscriptions that capture `Rc`s back to
/// themselves; the cycle is only broken by calling `destroy`.
pub trait Destroyable {
    fn destroy(&mut self);
}
