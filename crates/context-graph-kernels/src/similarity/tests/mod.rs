mod cached_tests;
mod cosine_tests;
mod search_tests;
