pub mod class;
pub mod class_manager;
pub mod class_resolver_by_id;
pub mod field_layout;
mod gc;
pub mod metadata_array;
pub mod metaspace_closure;
pub mod metaspace_obj;
pub mod virtual_field_info;
pub mod vm_error;
