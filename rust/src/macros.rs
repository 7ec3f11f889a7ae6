//! Macros shared by the cursor types.

/// Implements `Clone`, `Debug`, `PartialEq`, [`Cursor`](crate::Cursor) and
/// `Iterator` for a cursor struct with `nodes` and `current` fields plus the
/// listed pending-work stacks. The struct supplies `step(&mut self)`, which
/// moves `current` to the next node.
macro_rules! impl_cursor {
    ($cursor:ident { $($stack:ident),+ }) => {
        impl<'a, T> Clone for $cursor<'a, T> {
            fn clone(&self) -> Self {
                Self {
                    nodes: self.nodes,
                    current: self.current,
                    $($stack: self.$stack.clone(),)+
                }
            }
        }

        /// Shows the node ids the cursor holds, so `T` need not be `Debug`.
        impl<'a, T> std::fmt::Debug for $cursor<'a, T> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.debug_struct(stringify!($cursor))
                    .field("current", &self.current)
                    $(.field(stringify!($stack), &self.$stack))+
                    .finish()
            }
        }

        /// Cursors are equal when they point at the same node; all exhausted
        /// cursors are equal.
        impl<'a, T> PartialEq for $cursor<'a, T> {
            fn eq(&self, other: &Self) -> bool {
                self.current == other.current
            }
        }

        impl<'a, T> Eq for $cursor<'a, T> {}

        impl<'a, T: 'a> $crate::iteration::Cursor<'a, T> for $cursor<'a, T> {
            fn handle(&self) -> Option<$crate::types::Handle> {
                self.nodes
                    .contains(self.current)
                    .then_some($crate::types::Handle(self.current))
            }

            fn get(&self) -> Option<&'a T> {
                self.nodes.get(self.current).map(|node| &node.value)
            }

            fn advance(&mut self) {
                if self.current != $crate::types::NULL_NODE {
                    self.step();
                }
            }

            fn is_exhausted(&self) -> bool {
                self.current == $crate::types::NULL_NODE $(&& self.$stack.is_empty())+
            }
        }

        impl<'a, T: 'a> Iterator for $cursor<'a, T> {
            type Item = &'a T;

            fn next(&mut self) -> Option<Self::Item> {
                use $crate::iteration::Cursor;

                let value = self.get()?;
                self.advance();
                Some(value)
            }
        }

        impl<'a, T: 'a> std::iter::FusedIterator for $cursor<'a, T> {}
    };
}

/// Generates the named cursor shortcuts on `AvlTree`, e.g. `in_order()` and
/// `in_order_from(handle)` for `InOrder`.
macro_rules! traversal_shortcuts {
    ($($order:ident => $name:ident),+ $(,)?) => {
        paste::paste! {
            impl<T, C> $crate::types::AvlTree<T, C> {
                $(
                    #[doc = "Cursor over the whole tree in " $name " order, same as `begin::<" $order ">()`."]
                    pub fn $name(&self) -> [<$order Cursor>]<'_, T> {
                        self.begin::<$order>()
                    }

                    #[doc = "Cursor over the subtree at `handle` in " $name " order, same as `begin_at::<" $order ">(handle)`."]
                    pub fn [<$name _from>](&self, handle: $crate::types::Handle) -> [<$order Cursor>]<'_, T> {
                        self.begin_at::<$order>(handle)
                    }
                )+
            }
        }
    };
}
