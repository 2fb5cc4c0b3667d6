mod tests_format_files;
