//! Descriptors for a few common OpenGL entry points

symbols! {
    /// Every descriptor in this module
    ALL;

    glGetString = ["+1.0"],
    glClear = ["+1.0"],
    glBegin = ["+1.0", "-3.2"],
    glGetStringi = ["+3.0"],
    glGenVertexArrays = ["+3.0", "ARB_vertex_array_object"],
    glDebugMessageCallback = ["+4.3", "KHR_debug"],
}
