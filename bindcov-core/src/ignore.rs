//! Functions deliberately left unbound.
//!
//! Names are matched exactly. The set is built once per run and never
//! changes while a run is in progress.

use std::collections::HashSet;

/// Allegro functions the bindings skip: loader registration and `_f`
/// variants, file and filesystem interfaces, paths, threads and
/// synchronisation, `ALLEGRO_USTR`, fixed point math and system lifecycle.
/// Most of these are covered natively by the host language.
const ALLEGRO_IGNORED: &[&str] = &[
    "al_register_bitmap_loader",
    "al_register_bitmap_saver",
    "al_register_bitmap_loader_f",
    "al_register_bitmap_saver_f",
    "al_load_bitmap_f",
    "al_save_bitmap_f",
    "al_load_config_file_f",
    "al_save_config_file_f",
    "al_run_main",
    "al_toggle_display_flag", // deprecated
    "al_fopen_interface",
    "al_create_file_handle",
    "al_fungetc",
    "al_fgetc",
    "al_fputc",
    "al_fread16le",
    "al_fread16be",
    "al_fwrite16le",
    "al_fwrite16be",
    "al_fread32le",
    "al_fread32be",
    "al_fwrite32le",
    "al_fwrite32be",
    "al_fgets",
    "al_fget_ustr",
    "al_fputs",
    "al_fopen_fd",
    "al_get_new_file_interface",
    "al_set_standard_file_interface",
    "al_get_file_userdata",
    "al_fixsqrt",
    "al_fixhypot",
    "al_fixatan",
    "al_fixatan2",
    "al_destroy_fs_entry",
    "al_get_current_directory",
    "al_change_directory",
    "al_get_fs_interface",
    "al_set_fs_interface",
    "al_set_standard_fs_interface",
    "al_create_path",
    "al_create_path_for_directory",
    "al_clone_path",
    "al_get_path_num_components",
    "al_get_path_component",
    "al_replace_path_component",
    "al_remove_path_component",
    "al_insert_path_component",
    "al_get_path_tail",
    "al_drop_path_tail",
    "al_append_path_component",
    "al_join_paths",
    "al_rebase_path",
    "al_path_cstr",
    "al_destroy_path",
    "al_set_path_drive",
    "al_get_path_drive",
    "al_set_path_filename",
    "al_get_path_filename",
    "al_get_path_extension",
    "al_set_path_extension",
    "al_get_path_basename",
    "al_make_path_canonical",
    "al_install_system", // installed automatically
    "al_uninstall_system",
    "al_is_system_installed",
    "al_get_system_driver",
    "al_get_standard_path",
    "al_start_thread",
    "al_join_thread",
    "al_set_thread_should_stop",
    "al_get_thread_should_stop",
    "al_destroy_thread",
    "al_run_detached_thread",
    "al_create_mutex",
    "al_create_mutex_recursive",
    "al_lock_mutex",
    "al_unlock_mutex",
    "al_destroy_mutex",
    "al_create_cond",
    "al_destroy_cond",
    "al_wait_cond",
    "al_broadcast_cond",
    "al_signal_cond",
    "al_ustr_new",
    "al_ustr_new_from_buffer",
    "al_ustr_free",
    "al_cstr",
    "al_ustr_to_buffer",
    "al_cstr_dup",
    "al_ustr_dup",
    "al_ustr_empty_string",
    "al_ref_cstr",
    "al_ustr_size",
    "al_ustr_length",
    "al_ustr_offset",
    "al_ustr_next",
    "al_ustr_prev",
    "al_ustr_get",
    "al_ustr_get_next",
    "al_ustr_prev_get",
    "al_ustr_insert_chr",
    "al_ustr_append",
    "al_ustr_append_cstr",
    "al_ustr_append_chr",
    "al_ustr_remove_chr",
    "al_ustr_truncate",
    "al_ustr_ltrim_ws",
    "al_ustr_rtrim_ws",
    "al_ustr_trim_ws",
    "al_ustr_assign",
    "al_ustr_assign_cstr",
    "al_ustr_set_chr",
    "al_ustr_equal",
    "al_ustr_compare",
    "al_ustr_has_prefix_cstr",
    "al_utf8_width",
    "al_utf8_encode",
    "al_ustr_new_from_utf16",
    "al_ustr_size_utf16",
    "al_ustr_encode_utf16",
    "al_utf16_width",
    "al_utf16_encode",
    "al_get_errno",
    "al_set_errno",
    "al_register_font_loader",
    "al_get_ustr_width",
    "al_draw_ustr",
    "al_draw_justified_ustr",
    "al_get_ustr_dimensions",
    "al_load_ttf_font_f",
    "al_load_ttf_font_stretch_f",
];

/// Exact-match set of function names excluded from coverage reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IgnoreSet {
    names: HashSet<String>,
}

impl IgnoreSet {
    /// Empty set: every uncovered function is reported.
    pub fn new() -> Self {
        Self::default()
    }

    /// The Allegro allow-list.
    pub fn allegro_defaults() -> Self {
        ALLEGRO_IGNORED.iter().copied().collect()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            names: iter.into_iter().map(Into::into).collect(),
        }
    }
}

impl<S: Into<String>> Extend<S> for IgnoreSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        self.names.extend(iter.into_iter().map(Into::into));
    }
}
