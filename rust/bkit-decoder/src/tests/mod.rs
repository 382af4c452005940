mod string_tests;
mod varint_tests;
