extern crate dynamic_gl;

use dynamic_gl::symbols::ALL;
use dynamic_gl::{get_proc_address, load_gl, native_resolver};

pub fn main() {
    env_logger::init();

    match load_gl() {
        Ok(()) => println!("Loaded OpenGL: {:#?}", native_resolver()),
        Err(e) => {
            println!("Failed to load OpenGL: {}", e);
            return;
        }
    }

    for descriptor in ALL {
        match get_proc_address(descriptor) {
            Ok(addr) => println!("{} => {:?}", descriptor.name(), addr),
            Err(e) => println!("{}", e),
        }
    }
}
