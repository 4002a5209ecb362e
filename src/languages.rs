//! Builtin language grammars
//!
//! Grammars here are configuration, not engine logic: each one is expressed
//! entirely through the public authoring surface of [`crate::engine`] and
//! registered by [`Registry::with_builtins`](crate::engine::Registry).

pub mod javascript;
