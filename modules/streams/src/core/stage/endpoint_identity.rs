use alloc::rc::Rc;

/// Returns `true` when both handles point at the same endpoint allocation.
pub(crate) fn same_endpoint<A, B>(left: &Rc<A>, right: &Rc<B>) -> bool
where
  A: ?Sized,
  B: ?Sized, {
  core::ptr::addr_eq(Rc::as_ptr(left), Rc::as_ptr(right))
}
