use std::rc::Rc;

use knit::prelude::*;

pub struct Endpoint {
    pub host: String,
    pub port: u16,
    pub retries: u8,
    pub tags: Vec<String>,
}

#[component(Rc<Endpoint>, Rc::new)]
impl Endpoint {
    #[inject]
    pub fn new(
        #[named("endpoint_host")] host: String,
        #[default(8080)] port: u16,
        #[default] retries: u8,
        #[named("endpoint_tags")]
        #[default]
        tags: Vec<String>,
    ) -> Self {
        Self {
            host,
            port,
            retries,
            tags,
        }
    }
}

pub struct Raw;

#[component]
impl Raw {
    #[inject]
    pub fn new(r#type: &'static str) -> Self {
        let _ = r#type;
        Self
    }
}

fn main() {}
