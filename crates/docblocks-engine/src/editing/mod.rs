/*!
 * # Editing Core Module
 *
 * The live editing surface the hover decoration tracker plugs into.
 *
 * ## Architecture Overview
 *
 * ### 1. Single Source of Truth: xi-rope Buffer
 * - The entire document body is stored in a single **`xi_rope::Rope`** buffer
 * - Edits are **Deltas**; saving writes rope bytes verbatim with no formatting drift
 *
 * ### 2. Command-Based Editing
 * - All edits are **Commands** (`Cmd`) compiled to Deltas against the current rope
 * - Invalid ranges are rejected with `EditError` before anything is touched
 *
 * ### 3. Incremental Parsing with Tree-sitter
 * - **Tree-sitter Markdown** block tree, fed edits via `tree.edit()` and re-parsed
 * - Node lookup (`find_parent_node_closest_to_pos`) walks up from the smallest
 *   node at a position
 *
 * ### 4. Transactions and Position Mapping
 * - A `Transaction` is ordered steps plus per-plugin metadata, applied as a unit
 * - Its `Mapping` maps pre-transaction positions into the new document using
 *   xi-rope's `Transformer`
 *
 * ### 5. Decorations
 * - `HoverPlugin` owns a `DecorationSet` over nodes of one kind and updates it
 *   only from `EditorState::dispatch`
 * - Existing decorations are mapped through each transaction, never recomputed
 *
 * ## Module Structure
 *
 * - **`document`**: `Document` with xi-rope buffer and Tree-sitter integration
 * - **`commands`**: `Cmd` enum, delta compilation and `EditError`
 * - **`transaction`**: `Transaction` and hover metadata
 * - **`mapping`**: `Mapping` and `Assoc`
 * - **`decorations`**: `Decoration`, `DecorationTag`, `DecorationSet`
 * - **`hover`**: `HoverPlugin` and the `ViewDom` bridge
 * - **`state`**: `EditorState` dispatch loop
 * - **`patch`**: Edit result metadata
 *
 * ## Usage Pattern
 *
 * ```rust
 * use docblocks_engine::editing::*;
 *
 * let doc = Document::from_bytes(b"- Item 1\n- Item 2\n").unwrap();
 * let mut state = EditorState::new(doc).with_plugin(HoverPlugin::new("li", "list_item"));
 *
 * let hover = HoverAction { event: HoverEvent::Mouseover, pos: 11 };
 * state.dispatch(Transaction::new().set_meta("li", hover)).unwrap();
 *
 * state
 *     .dispatch(Transaction::new().step(Cmd::InsertText { at: 0, text: "# Title\n\n".into() }))
 *     .unwrap();
 *
 * let classes: Vec<_> = state.decorations().map(|d| d.class()).collect();
 * assert_eq!(classes, ["hovering", "counter"]);
 * ```
 */

pub mod commands;
pub mod decorations;
pub mod document;
pub mod hover;
pub mod mapping;
pub mod patch;
pub mod state;
pub mod transaction;

pub use commands::{Cmd, EditError};
pub use decorations::{Decoration, DecorationSet, DecorationTag};
pub use document::{Document, NodeRange};
pub use hover::{HoverPlugin, ViewDom};
pub use mapping::{Assoc, Mapping};
pub use patch::Patch;
pub use state::EditorState;
pub use transaction::{HoverAction, HoverEvent, Transaction};
