//! Stream operators: filter, map, reducers, sharder, union and join.

mod deduplicate_reducer;
mod input_to_output;
mod merge_sort_reducer;
mod reducer;
mod reducer_config;
mod reducer_to_result;
mod stream_filter;
mod stream_join;
mod stream_map;
mod stream_memory_reducer;
mod stream_reducer;
mod stream_reducer_simple;
mod stream_reducers;
mod stream_sharder;
mod stream_union;
mod value_joiner;

use deduplicate_reducer::DeduplicateReducer;
pub use input_to_output::InputToOutput;
use merge_sort_reducer::MergeSortReducer;
pub use reducer::Reducer;
pub use reducer_config::ReducerConfig;
pub use reducer_to_result::ReducerToResult;
pub use stream_filter::StreamFilter;
pub use stream_join::StreamJoin;
pub use stream_map::StreamMap;
pub use stream_memory_reducer::StreamMemoryReducer;
pub use stream_reducer::StreamReducer;
pub use stream_reducer_simple::StreamReducerSimple;
pub use stream_reducers::StreamReducers;
pub use stream_sharder::StreamSharder;
pub use stream_union::StreamUnion;
pub use value_joiner::ValueJoiner;
