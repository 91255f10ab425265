//! Motion and text-object resolution for modal editors.
//!
//! This crate computes *where motions land*, not what edits do: given a
//! read-only view of a buffer and a caret, it resolves the boundary
//! searches behind vi-style motions and text objects, and folds ex
//! command address lists into line ranges. It owns no text and performs
//! no I/O; hosts plug in their own buffer via [`buffer::TextBuffer`] or
//! use the bundled rope-backed [`buffer::RopeBuffer`].
//!
//! | Module | Concern |
//! |--------------|--------------------------------------------------|
//! | [`buffer`] | Buffer and cursor traits, rope implementation |
//! | [`span`] | Offset ranges and scan direction |
//! | [`charclass`]| Word/punctuation/whitespace classification |
//! | [`word`] | Word and WORD motions (`w`, `b`, `e`, `ge`) |
//! | [`camel`] | Camel-case sub-word motions |
//! | [`quote`] | Quoted-span text objects (`i"`, `a'`) |
//! | [`paragraph`]| Paragraph motions and objects (`{`, `}`, `ip`) |
//! | [`sentence`] | Sentence motions and objects (`(`, `)`, `is`) |
//! | [`ex_range`] | Ex address-list resolution (`:3,7`, `:/pat/`) |

pub mod buffer;
pub mod camel;
pub mod charclass;
pub mod ex_range;
pub mod paragraph;
pub mod quote;
pub mod sentence;
pub mod span;
pub mod word;
