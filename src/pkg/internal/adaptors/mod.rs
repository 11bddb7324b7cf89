pub mod applications {
    pub mod mutators;
    pub mod selectors;
    pub mod spec;
}

pub mod companies {
    pub mod mutators;
    pub mod selectors;
    pub mod spec;
}

pub mod contacts {
    pub mod mutators;
    pub mod spec;
}

pub mod jobs {
    pub mod mutators;
    pub mod selectors;
    pub mod spec;
}

pub mod quizzes {
    pub mod mutators;
    pub mod selectors;
    pub mod spec;
}

pub mod results {
    pub mod mutators;
    pub mod selectors;
    pub mod spec;
}
