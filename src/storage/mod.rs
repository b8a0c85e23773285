//!  Storage is organized around a plain string key-value store ([kv::KeyValueStore]).
//!  The basic idea is:
//!   - Every task of every day has its own key, `day{day}-task{task}`.
//!   - Values are the strings `"true"` or `"false"`. Missing keys mean unchecked.
//!   - [progress::ProgressStore] is the only thing that reads or writes those keys.

pub mod kv;
pub mod progress;
