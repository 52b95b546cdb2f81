pub mod quest_list;
pub mod quest_viewer;
