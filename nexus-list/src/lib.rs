//! Doubly-linked list with stack, queue and priority-list adapters.
//!
//! One container, three access disciplines. A [`List`] is created with an
//! [`AdapterType`] that binds five uniform verbs (`push`, `pop`, `peek_next`,
//! `peek_other_end`, `replace_next`) to the right end operations, while the
//! full set of by-end, by-position and by-value operations stays available
//! underneath.
//!
//! ```text
//! List<T>       - owns the chain: slab arena of nodes, head/tail, adapter
//! Comparator<T> - optional ordering: sorted insert, search by value
//! Cursor        - detached position: move, find, insert, read, edit, get
//! ```
//!
//! # Quick Start
//!
//! ```
//! use nexus_list::{Comparator, List};
//!
//! // LIFO
//! let mut stack = List::stack();
//! stack.push(1).unwrap();
//! stack.push(2).unwrap();
//! stack.push(3).unwrap();
//! assert_eq!(stack.peek_next(), Ok(&3));
//! assert_eq!(stack.pop(), Ok(3));
//! assert_eq!(stack.pop(), Ok(2));
//! assert_eq!(stack.len(), 1);
//!
//! // Ordered by comparator, lowest first
//! let mut prio = List::priority(Comparator::natural());
//! prio.push(5).unwrap();
//! prio.push(1).unwrap();
//! prio.push(3).unwrap();
//! assert_eq!(prio.iter().copied().collect::<Vec<_>>(), vec![1, 3, 5]);
//! ```
//!
//! # Cursors
//!
//! Cursors hold no borrow of their list. They carry the owner's id and a
//! generation-checked node handle, and take the list on every call:
//!
//! ```
//! use nexus_list::{List, ListError};
//!
//! let mut list = List::queue();
//! for v in [1, 2, 3] {
//!     list.push(v).unwrap();
//! }
//!
//! let mut cursor = list.cursor(true);
//! cursor.move_by(&list, 1).unwrap();
//! cursor.insert(&mut list, 99, true).unwrap();
//! assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![1, 2, 99, 3]);
//!
//! // Removing the cursor's node through the list is detected
//! list.remove_at(1).unwrap();
//! assert_eq!(cursor.read(&list), Err(ListError::Invalidated));
//!
//! cursor.close(&mut list).unwrap();
//! list.destroy().unwrap();
//! ```
//!
//! # Payload Ownership
//!
//! The list never drops a payload on its own initiative: every removal hands
//! the payload back. Only [`List::clear`], [`List::destroy`] and `Drop` drop
//! what is left. Pick `T` to express the ownership you want; `Rc<X>` or an
//! index into caller storage keep the data with the caller.
//!
//! # Threading
//!
//! Single-threaded. Nothing blocks and nothing is locked; wrap the list in a
//! mutex if several threads need it, and keep its cursors behind the same
//! lock.

#![warn(missing_docs)]

pub mod adapter;
pub mod cursor;
pub mod error;
mod handle;
pub mod list;
pub mod order;

pub use adapter::{Adapter, AdapterType, End, Placement};
pub use cursor::Cursor;
pub use error::{Busy, ListError};
pub use handle::ListId;
pub use list::{Iter, List};
pub use order::Comparator;
