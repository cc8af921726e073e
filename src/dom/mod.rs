// DOM sin framework: helpers de elementos, builder y listeners

pub mod builder;
pub mod element;
pub mod events;

pub use builder::ElementBuilder;
pub use element::{
    append_child, clear_children, control_value, create_element, get_element_by_id, set_attribute,
    set_class_name, set_text_content, window,
};
pub use events::{on_change, on_click, on_input, on_navigate, on_submit};
