mod tests_directory_provider;
mod tests_import_closure;
mod tests_reference_binding;
