pub mod configuration;

pub mod manager {
    pub mod namedobject;
    pub mod managererror;
    pub mod manager;
}

pub mod math {
    pub mod geometryerror;
    pub mod point2d;

    pub mod curve {
        pub mod curve;
        pub mod cubicbezier;
        pub mod pathspec;
        pub mod closedcurve;
    }

    pub mod divider {
        pub mod dividerlocator;
    }

    pub mod scale {
        pub mod linearscale;
        pub mod geographicprojection;
    }
}

pub mod sunshine {
    pub mod sunshinerecord;
    pub mod sunshineseries;
    pub mod sunshinemap;
}
